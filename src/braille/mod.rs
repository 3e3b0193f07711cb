mod canvas;

pub use canvas::{braille_bits, braille_char, BrailleCanvas};
