use anyhow::Context;
use anyhow::Result;
use std::fs;
use std::path::Path;

/// Input name used when none is given, as SquareLine Studio exports it.
pub const DEFAULT_INPUT: &str = "myFont_new.c";
/// Output name used when none is given, as the firmware build expects it.
pub const DEFAULT_OUTPUT: &str = "myFont_new_fixed.c";

/// The initializer line emitted by newer lv_font_conv releases for
/// `lv_font_fmt_txt_dsc_t`. Older LVGL headers have no `static_bitmap`
/// member, so a font source containing this line fails to compile.
/// The trailing newline is part of the pattern: a final fragment without
/// one is never removed.
pub const STATIC_BITMAP_LINE: &str = "    .static_bitmap = 0,\n";

#[derive(Debug, PartialEq, Eq)]
pub struct FixSummary {
    /// Input size in characters (not bytes)
    pub chars_in: usize,
    /// Output size in characters
    pub chars_out: usize,
    /// Number of `.static_bitmap` lines dropped
    pub lines_removed: usize,
}

/// Removes every line that is exactly `STATIC_BITMAP_LINE` and returns the
/// filtered text along with the number of lines removed.
///
/// Lines are compared with their trailing newline included, so each line of
/// the input is either carried over byte for byte or dropped whole; nothing
/// else is rewritten.
pub fn drop_static_bitmap_lines(input: &str) -> (String, usize) {
    let mut output = String::with_capacity(input.len());
    let mut removed = 0;
    for line in input.split_inclusive('\n') {
        if line == STATIC_BITMAP_LINE {
            removed += 1;
        } else {
            output.push_str(line);
        }
    }
    (output, removed)
}

/// Reads `input`, drops the `.static_bitmap` lines, and writes the result to
/// `output`, overwriting whatever was there. The input is read in full
/// before the output is opened, so a failed read leaves no output file
/// behind and the input is never modified.
pub fn fix_font_file(input: &Path, output: &Path) -> Result<FixSummary> {
    let source = fs::read_to_string(input)
        .with_context(|| format!("failed to read {}", input.display()))?;
    let (fixed, lines_removed) = drop_static_bitmap_lines(&source);
    fs::write(output, &fixed)
        .with_context(|| format!("failed to write {}", output.display()))?;
    Ok(FixSummary {
        chars_in: source.chars().count(),
        chars_out: fixed.chars().count(),
        lines_removed,
    })
}
