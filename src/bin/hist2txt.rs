use anyhow::Context;
use argh::FromArgs;
use roottools::dump::{self, DumpOptions, LabelMode};
use roottools::literal::{BinRange, Binning};
use roottools::logging;
use roottools::store::{JsonFile, ProjectionAxis};

#[derive(FromArgs)]
/// print a histogram to screen.
struct Args {
    #[argh(positional)]
    /// file holding the histogram.
    file: String,

    #[argh(positional)]
    /// path of the histogram inside the file.
    path: String,

    #[argh(switch, short = 's')]
    /// show the statistical error of each bin.
    show_errors: bool,

    #[argh(switch)]
    /// label bins with their edges instead of their center.
    bin_range: bool,

    #[argh(switch)]
    /// use narrow columns.
    compact: bool,

    #[argh(option)]
    /// rebin before printing: a merge factor (4 or (4)) or a list of edges ([0, 1, 5]).
    rebin: Option<Binning>,

    #[argh(option)]
    /// project a 2-D histogram onto the X or Y axis.
    project: Option<ProjectionAxis>,

    #[argh(switch)]
    /// label bins with their text labels instead of their center.
    use_labels: bool,

    #[argh(option)]
    /// only print bins whose center lies in (low, high).
    range: Option<BinRange>,

    #[argh(option, default = "tracing::Level::WARN")]
    /// diagnostics level: error, warn, info, debug or trace.
    log_level: tracing::Level,
}

fn main() -> anyhow::Result<()> {
    let args: Args = argh::from_env();
    logging::init(args.log_level);

    let opts = DumpOptions {
        show_errors: args.show_errors,
        compact: args.compact,
        labels: LabelMode::from_flags(args.bin_range, args.use_labels)?,
        project: args.project,
        rebin: args.rebin,
        range: args.range,
    };
    let file = JsonFile::open(&args.file).with_context(|| format!("can't open {}", args.file))?;
    let mut stdout = std::io::stdout().lock();
    dump::dump(&file, &args.path, &opts, &mut stdout)
        .with_context(|| format!("can't print {}", args.path))?;
    Ok(())
}
