use anyhow::bail;
use anyhow::Result;


fn main() -> Result<()> {
    bail!("Please run `cargo test` instead.");
}
