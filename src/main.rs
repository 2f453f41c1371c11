use anyhow::Result;
use log::debug;
use minish::Interpreter;
use minish::io_adapters::Readline;

fn main() -> Result<()> {
    env_logger::init();

    let mut input = Readline::new()?;
    let reason = Interpreter::default().run(&mut input)?;
    debug!("stopped: {reason:?}");
    Ok(())
}
