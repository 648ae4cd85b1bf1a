use anyhow::Result;
use argh::FromArgs;
use fontfix::fix_font_file;
use fontfix::DEFAULT_INPUT;
use fontfix::DEFAULT_OUTPUT;
use fontfix::STATIC_BITMAP_LINE;
use std::path::Path;

#[derive(FromArgs, PartialEq, Debug)]
/// Drop the `.static_bitmap` initializer lines from a generated LVGL font
/// source so it compiles against older LVGL headers.
struct Args {
    #[argh(option)]
    /// path to the generated font source (default: myFont_new.c)
    input: Option<String>,
    #[argh(option)]
    /// path to write the fixed copy to (default: myFont_new_fixed.c)
    output: Option<String>,
}

fn main() -> Result<()> {
    let args: Args = argh::from_env();
    let input = args.input.unwrap_or_else(|| DEFAULT_INPUT.to_string());
    let output = args.output.unwrap_or_else(|| DEFAULT_OUTPUT.to_string());
    let summary = fix_font_file(Path::new(&input), Path::new(&output))?;
    println!("Input size  : {} chars", summary.chars_in);
    if summary.lines_removed == 0 {
        eprintln!(
            "Warning: no {:?} line found; output equals input",
            STATIC_BITMAP_LINE.trim_end_matches('\n')
        );
    }
    println!(
        "Fix done    : removed {} line(s), wrote {output}",
        summary.lines_removed
    );
    println!("Output size : {} chars", summary.chars_out);
    Ok(())
}
