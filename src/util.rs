use smallvec::SmallVec;

use crate::types::WordId;
use crate::word_list::WordList;
use crate::MAX_GLYPH_COUNT;

/// Number of occurrences of each glyph at one cell across a set of options, indexed by `GlyphId`.
pub type GlyphCounts = SmallVec<[u32; MAX_GLYPH_COUNT]>;

/// Count the glyphs appearing at `cell_idx` in each of the given options. Options too short to
/// reach `cell_idx` don't contribute to any count.
pub fn build_glyph_counts(
    word_list: &WordList,
    options: &[WordId],
    cell_idx: usize,
) -> GlyphCounts {
    let mut result: GlyphCounts = (0..word_list.glyphs.len()).map(|_| 0).collect();

    for &word_id in options {
        if let Some(&glyph) = word_list.words[word_id].glyphs.get(cell_idx) {
            result[glyph] += 1;
        }
    }

    result
}
