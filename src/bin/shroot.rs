use anyhow::Context;
use argh::FromArgs;
use roottools::Interpreter;
use roottools::logging;
use roottools::store::JsonFile;

#[derive(FromArgs)]
/// browse the contents of a data file like a directory tree.
/// set SHROOT_LOG to a level (error, warn, info, debug, trace) for diagnostics.
struct Args {
    #[argh(positional)]
    /// file to open.
    file: String,
}

fn main() -> anyhow::Result<()> {
    let args: Args = argh::from_env();
    logging::init(logging::level_from_env("SHROOT_LOG"));

    let file = JsonFile::open(&args.file).with_context(|| format!("can't open {}", args.file))?;
    let mut shell = Interpreter::new(args.file, Box::new(file));
    shell
        .repl()
        .map_err(|e| anyhow::anyhow!("terminal error: {e}"))?;
    Ok(())
}
