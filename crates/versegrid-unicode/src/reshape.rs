// this_file: crates/versegrid-unicode/src/reshape.rs

//! Arabic contextual shaping
//!
//! Arabic letters change shape depending on whether they connect to the
//! letter before and after them. Without a font-aware shaper the only
//! portable way to show those shapes is to swap each letter for its code
//! point in the Arabic Presentation Forms blocks, which is what this module
//! does. Work happens in logical order; bidi reordering comes afterwards.

const TATWEEL: char = '\u{0640}';
const ZWJ: char = '\u{200D}';
const ALEF: char = '\u{0627}';
const LAM: char = '\u{0644}';
const HEH: char = '\u{0647}';

/// ARABIC LIGATURE ALLAH, which only has an isolated form
const ALLAH: char = '\u{FDF2}';

/// How a character participates in cursive joining
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Joining {
    /// Connects on both sides (beh, seen, lam, ...)
    Dual,
    /// Connects only to the preceding letter (alef, dal, waw, ...)
    Right,
    /// Forces a connection on both sides without changing shape (tatweel, ZWJ)
    Causing,
    /// Never connects
    NonJoining,
    /// Ignored when looking for neighbours (harakat)
    Transparent,
}

impl Joining {
    fn connects_forward(self) -> bool {
        matches!(self, Self::Dual | Self::Causing)
    }

    fn connects_backward(self) -> bool {
        matches!(self, Self::Dual | Self::Right | Self::Causing)
    }
}

/// Presentation forms of one letter; `None` where the letter has no such form
#[derive(Debug, Clone, Copy)]
struct ArabicLetter {
    letter: char,
    isolated: char,
    final_form: Option<char>,
    initial: Option<char>,
    medial: Option<char>,
}

impl ArabicLetter {
    const fn dual(letter: char, isolated: char, final_form: char, initial: char, medial: char) -> Self {
        Self {
            letter,
            isolated,
            final_form: Some(final_form),
            initial: Some(initial),
            medial: Some(medial),
        }
    }

    const fn right(letter: char, isolated: char, final_form: char) -> Self {
        Self {
            letter,
            isolated,
            final_form: Some(final_form),
            initial: None,
            medial: None,
        }
    }

    const fn lone(letter: char, isolated: char) -> Self {
        Self {
            letter,
            isolated,
            final_form: None,
            initial: None,
            medial: None,
        }
    }

    fn joining(&self) -> Joining {
        if self.initial.is_some() {
            Joining::Dual
        } else if self.final_form.is_some() {
            Joining::Right
        } else {
            Joining::NonJoining
        }
    }

    fn form(&self, joins_previous: bool, joins_next: bool) -> char {
        let form = match (joins_previous, joins_next) {
            (true, true) => self.medial,
            (true, false) => self.final_form,
            (false, true) => self.initial,
            (false, false) => None,
        };
        form.unwrap_or(self.isolated)
    }
}

// Sorted by code point for binary search.
const LETTERS: &[ArabicLetter] = &[
    ArabicLetter::lone('\u{0621}', '\u{FE80}'),
    ArabicLetter::right('\u{0622}', '\u{FE81}', '\u{FE82}'),
    ArabicLetter::right('\u{0623}', '\u{FE83}', '\u{FE84}'),
    ArabicLetter::right('\u{0624}', '\u{FE85}', '\u{FE86}'),
    ArabicLetter::right('\u{0625}', '\u{FE87}', '\u{FE88}'),
    ArabicLetter::dual('\u{0626}', '\u{FE89}', '\u{FE8A}', '\u{FE8B}', '\u{FE8C}'),
    ArabicLetter::right('\u{0627}', '\u{FE8D}', '\u{FE8E}'),
    ArabicLetter::dual('\u{0628}', '\u{FE8F}', '\u{FE90}', '\u{FE91}', '\u{FE92}'),
    ArabicLetter::right('\u{0629}', '\u{FE93}', '\u{FE94}'),
    ArabicLetter::dual('\u{062A}', '\u{FE95}', '\u{FE96}', '\u{FE97}', '\u{FE98}'),
    ArabicLetter::dual('\u{062B}', '\u{FE99}', '\u{FE9A}', '\u{FE9B}', '\u{FE9C}'),
    ArabicLetter::dual('\u{062C}', '\u{FE9D}', '\u{FE9E}', '\u{FE9F}', '\u{FEA0}'),
    ArabicLetter::dual('\u{062D}', '\u{FEA1}', '\u{FEA2}', '\u{FEA3}', '\u{FEA4}'),
    ArabicLetter::dual('\u{062E}', '\u{FEA5}', '\u{FEA6}', '\u{FEA7}', '\u{FEA8}'),
    ArabicLetter::right('\u{062F}', '\u{FEA9}', '\u{FEAA}'),
    ArabicLetter::right('\u{0630}', '\u{FEAB}', '\u{FEAC}'),
    ArabicLetter::right('\u{0631}', '\u{FEAD}', '\u{FEAE}'),
    ArabicLetter::right('\u{0632}', '\u{FEAF}', '\u{FEB0}'),
    ArabicLetter::dual('\u{0633}', '\u{FEB1}', '\u{FEB2}', '\u{FEB3}', '\u{FEB4}'),
    ArabicLetter::dual('\u{0634}', '\u{FEB5}', '\u{FEB6}', '\u{FEB7}', '\u{FEB8}'),
    ArabicLetter::dual('\u{0635}', '\u{FEB9}', '\u{FEBA}', '\u{FEBB}', '\u{FEBC}'),
    ArabicLetter::dual('\u{0636}', '\u{FEBD}', '\u{FEBE}', '\u{FEBF}', '\u{FEC0}'),
    ArabicLetter::dual('\u{0637}', '\u{FEC1}', '\u{FEC2}', '\u{FEC3}', '\u{FEC4}'),
    ArabicLetter::dual('\u{0638}', '\u{FEC5}', '\u{FEC6}', '\u{FEC7}', '\u{FEC8}'),
    ArabicLetter::dual('\u{0639}', '\u{FEC9}', '\u{FECA}', '\u{FECB}', '\u{FECC}'),
    ArabicLetter::dual('\u{063A}', '\u{FECD}', '\u{FECE}', '\u{FECF}', '\u{FED0}'),
    ArabicLetter::dual('\u{0641}', '\u{FED1}', '\u{FED2}', '\u{FED3}', '\u{FED4}'),
    ArabicLetter::dual('\u{0642}', '\u{FED5}', '\u{FED6}', '\u{FED7}', '\u{FED8}'),
    ArabicLetter::dual('\u{0643}', '\u{FED9}', '\u{FEDA}', '\u{FEDB}', '\u{FEDC}'),
    ArabicLetter::dual('\u{0644}', '\u{FEDD}', '\u{FEDE}', '\u{FEDF}', '\u{FEE0}'),
    ArabicLetter::dual('\u{0645}', '\u{FEE1}', '\u{FEE2}', '\u{FEE3}', '\u{FEE4}'),
    ArabicLetter::dual('\u{0646}', '\u{FEE5}', '\u{FEE6}', '\u{FEE7}', '\u{FEE8}'),
    ArabicLetter::dual('\u{0647}', '\u{FEE9}', '\u{FEEA}', '\u{FEEB}', '\u{FEEC}'),
    ArabicLetter::right('\u{0648}', '\u{FEED}', '\u{FEEE}'),
    ArabicLetter::dual('\u{0649}', '\u{FEEF}', '\u{FEF0}', '\u{FBE8}', '\u{FBE9}'),
    ArabicLetter::dual('\u{064A}', '\u{FEF1}', '\u{FEF2}', '\u{FEF3}', '\u{FEF4}'),
    ArabicLetter::right('\u{0671}', '\u{FB50}', '\u{FB51}'),
    // Persian, Urdu and other extended letters
    ArabicLetter::dual('\u{0679}', '\u{FB66}', '\u{FB67}', '\u{FB68}', '\u{FB69}'),
    ArabicLetter::dual('\u{067A}', '\u{FB5E}', '\u{FB5F}', '\u{FB60}', '\u{FB61}'),
    ArabicLetter::dual('\u{067B}', '\u{FB52}', '\u{FB53}', '\u{FB54}', '\u{FB55}'),
    ArabicLetter::dual('\u{067E}', '\u{FB56}', '\u{FB57}', '\u{FB58}', '\u{FB59}'),
    ArabicLetter::dual('\u{067F}', '\u{FB62}', '\u{FB63}', '\u{FB64}', '\u{FB65}'),
    ArabicLetter::dual('\u{0680}', '\u{FB5A}', '\u{FB5B}', '\u{FB5C}', '\u{FB5D}'),
    ArabicLetter::dual('\u{0683}', '\u{FB76}', '\u{FB77}', '\u{FB78}', '\u{FB79}'),
    ArabicLetter::dual('\u{0684}', '\u{FB72}', '\u{FB73}', '\u{FB74}', '\u{FB75}'),
    ArabicLetter::dual('\u{0686}', '\u{FB7A}', '\u{FB7B}', '\u{FB7C}', '\u{FB7D}'),
    ArabicLetter::dual('\u{0687}', '\u{FB7E}', '\u{FB7F}', '\u{FB80}', '\u{FB81}'),
    ArabicLetter::right('\u{0688}', '\u{FB88}', '\u{FB89}'),
    ArabicLetter::right('\u{068C}', '\u{FB84}', '\u{FB85}'),
    ArabicLetter::right('\u{068D}', '\u{FB82}', '\u{FB83}'),
    ArabicLetter::right('\u{068E}', '\u{FB86}', '\u{FB87}'),
    ArabicLetter::right('\u{0691}', '\u{FB8C}', '\u{FB8D}'),
    ArabicLetter::right('\u{0698}', '\u{FB8A}', '\u{FB8B}'),
    ArabicLetter::dual('\u{06A4}', '\u{FB6A}', '\u{FB6B}', '\u{FB6C}', '\u{FB6D}'),
    ArabicLetter::dual('\u{06A6}', '\u{FB6E}', '\u{FB6F}', '\u{FB70}', '\u{FB71}'),
    ArabicLetter::dual('\u{06A9}', '\u{FB8E}', '\u{FB8F}', '\u{FB90}', '\u{FB91}'),
    ArabicLetter::dual('\u{06AD}', '\u{FBD3}', '\u{FBD4}', '\u{FBD5}', '\u{FBD6}'),
    ArabicLetter::dual('\u{06AF}', '\u{FB92}', '\u{FB93}', '\u{FB94}', '\u{FB95}'),
    ArabicLetter::dual('\u{06B1}', '\u{FB9A}', '\u{FB9B}', '\u{FB9C}', '\u{FB9D}'),
    ArabicLetter::dual('\u{06B3}', '\u{FB96}', '\u{FB97}', '\u{FB98}', '\u{FB99}'),
    // Noon ghunna has no initial or medial presentation form
    ArabicLetter::right('\u{06BA}', '\u{FB9E}', '\u{FB9F}'),
    ArabicLetter::dual('\u{06BB}', '\u{FBA0}', '\u{FBA1}', '\u{FBA2}', '\u{FBA3}'),
    ArabicLetter::dual('\u{06BE}', '\u{FBAA}', '\u{FBAB}', '\u{FBAC}', '\u{FBAD}'),
    ArabicLetter::right('\u{06C0}', '\u{FBA4}', '\u{FBA5}'),
    ArabicLetter::dual('\u{06C1}', '\u{FBA6}', '\u{FBA7}', '\u{FBA8}', '\u{FBA9}'),
    ArabicLetter::right('\u{06C5}', '\u{FBE0}', '\u{FBE1}'),
    ArabicLetter::right('\u{06C6}', '\u{FBD9}', '\u{FBDA}'),
    ArabicLetter::right('\u{06C7}', '\u{FBD7}', '\u{FBD8}'),
    ArabicLetter::right('\u{06C8}', '\u{FBDB}', '\u{FBDC}'),
    ArabicLetter::right('\u{06C9}', '\u{FBE2}', '\u{FBE3}'),
    ArabicLetter::right('\u{06CB}', '\u{FBDE}', '\u{FBDF}'),
    ArabicLetter::dual('\u{06CC}', '\u{FBFC}', '\u{FBFD}', '\u{FBFE}', '\u{FBFF}'),
    ArabicLetter::dual('\u{06D0}', '\u{FBE4}', '\u{FBE5}', '\u{FBE6}', '\u{FBE7}'),
    ArabicLetter::right('\u{06D2}', '\u{FBAE}', '\u{FBAF}'),
    ArabicLetter::right('\u{06D3}', '\u{FBB0}', '\u{FBB1}'),
];

/// (alef variant, isolated ligature, final ligature) for a preceding lam
const LAM_ALEF: &[(char, char, char)] = &[
    ('\u{0622}', '\u{FEF5}', '\u{FEF6}'),
    ('\u{0623}', '\u{FEF7}', '\u{FEF8}'),
    ('\u{0625}', '\u{FEF9}', '\u{FEFA}'),
    ('\u{0627}', '\u{FEFB}', '\u{FEFC}'),
];

fn letter(ch: char) -> Option<&'static ArabicLetter> {
    LETTERS
        .binary_search_by_key(&ch, |entry| entry.letter)
        .ok()
        .and_then(|index| LETTERS.get(index))
}

fn lam_alef(alef: char) -> Option<(char, char)> {
    LAM_ALEF
        .iter()
        .find(|(variant, _, _)| *variant == alef)
        .map(|&(_, isolated, final_form)| (isolated, final_form))
}

/// Arabic diacritics and Quranic annotation marks
pub fn is_harakah(ch: char) -> bool {
    matches!(ch,
        '\u{0610}'..='\u{061A}'
        | '\u{064B}'..='\u{065F}'
        | '\u{0670}'
        | '\u{06D6}'..='\u{06DC}'
        | '\u{06DF}'..='\u{06E8}'
        | '\u{06EA}'..='\u{06ED}'
        | '\u{08D4}'..='\u{08E1}'
        | '\u{08E3}'..='\u{08FF}')
}

/// Joining behaviour of any character
pub fn joining(ch: char) -> Joining {
    if is_harakah(ch) {
        Joining::Transparent
    } else if ch == TATWEEL || ch == ZWJ {
        Joining::Causing
    } else {
        letter(ch).map_or(Joining::NonJoining, ArabicLetter::joining)
    }
}

/// Replaces Arabic letters with their contextual presentation forms
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ArabicReshaper {
    delete_harakat: bool,
    ligatures: bool,
}

impl Default for ArabicReshaper {
    fn default() -> Self {
        Self {
            delete_harakat: true,
            ligatures: true,
        }
    }
}

impl ArabicReshaper {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn delete_harakat(mut self, delete: bool) -> Self {
        self.delete_harakat = delete;
        self
    }

    pub fn ligatures(mut self, enabled: bool) -> Self {
        self.ligatures = enabled;
        self
    }

    /// Shape `text`, which must be in logical order
    pub fn reshape(&self, text: &str) -> String {
        let chars: Vec<char> = if self.delete_harakat {
            text.chars().filter(|ch| !is_harakah(*ch)).collect()
        } else {
            text.chars().collect()
        };

        let mut shaped = String::with_capacity(text.len());
        let mut index = 0;

        while index < chars.len() {
            let ch = chars[index];
            let Some(current) = letter(ch) else {
                shaped.push(ch);
                index += 1;
                continue;
            };

            let joins_previous = current.joining().connects_backward()
                && previous_joining(&chars, index).is_some_and(Joining::connects_forward);
            let next = next_joining_index(&chars, index);

            if self.ligatures && ch == ALEF && !joins_previous {
                if let Some(last) = allah_end(&chars, index) {
                    shaped.push(ALLAH);
                    // Marks inside the word follow the ligature
                    shaped.extend(
                        chars[index + 1..=last]
                            .iter()
                            .filter(|ch| joining(**ch) == Joining::Transparent),
                    );
                    index = last + 1;
                    continue;
                }
            }

            if self.ligatures && ch == LAM {
                if let Some((next_index, (isolated, final_form))) =
                    next.and_then(|n| lam_alef(chars[n]).map(|forms| (n, forms)))
                {
                    shaped.push(if joins_previous { final_form } else { isolated });
                    // Marks sitting between lam and alef follow the ligature
                    shaped.extend(&chars[index + 1..next_index]);
                    index = next_index + 1;
                    continue;
                }
            }

            let joins_next = current.joining().connects_forward()
                && next.is_some_and(|n| joining(chars[n]).connects_backward());

            shaped.push(current.form(joins_previous, joins_next));
            index += 1;
        }

        shaped
    }
}

/// Index of the heh ending an isolated alef-lam-lam-heh starting at `start`
///
/// Marks between the letters are skipped. The word only folds into the
/// ligature when the heh does not connect to whatever follows it.
fn allah_end(chars: &[char], start: usize) -> Option<usize> {
    let mut last = start;
    for expected in [LAM, LAM, HEH] {
        last = next_joining_index(chars, last)?;
        if chars[last] != expected {
            return None;
        }
    }
    let heh_joins_next =
        next_joining_index(chars, last).is_some_and(|n| joining(chars[n]).connects_backward());
    (!heh_joins_next).then_some(last)
}

/// Joining type of the nearest non-transparent character before `index`
fn previous_joining(chars: &[char], index: usize) -> Option<Joining> {
    chars[..index]
        .iter()
        .rev()
        .map(|ch| joining(*ch))
        .find(|kind| *kind != Joining::Transparent)
}

/// Position of the nearest non-transparent character after `index`
fn next_joining_index(chars: &[char], index: usize) -> Option<usize> {
    chars
        .iter()
        .enumerate()
        .skip(index + 1)
        .find(|(_, ch)| joining(**ch) != Joining::Transparent)
        .map(|(position, _)| position)
}
