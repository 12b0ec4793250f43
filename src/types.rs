/// An identifier for a given letter or symbol, based on its index in the `WordList`'s `glyphs`
/// field.
pub type GlyphId = usize;

/// An identifier for a given word, based on its index in the `WordList`'s `words` field.
pub type WordId = usize;

/// An identifier for a variable (slot), based on its index in the `GridConfig`'s `variables`
/// field.
pub type VariableId = usize;

/// A directed constraint between two variables: `(x, y)` means "make x consistent with y".
pub type DirectedArc = (VariableId, VariableId);
