use anyhow::Result;

fn main() -> Result<()> {
    dragdo::tui::run()
}
