//! scaffold's main application entry point.
//! Parses the command line, builds the template context and runs the
//! generator.

use scaffold::{
    cli::{build_context, get_args, Args},
    error::{default_error_handler, Result},
    generator::{GenerateOptions, Generator},
    prompt::{DialoguerPrompter, NoInputPrompter, Prompter},
    renderer::MiniJinjaRenderer,
};

/// Main application entry point.
fn main() {
    let args = get_args();

    // Logger configuration
    env_logger::Builder::new()
        .filter_level(if args.verbose {
            log::LevelFilter::Trace
        } else {
            log::LevelFilter::Off
        })
        .init();

    if let Err(err) = run(args) {
        default_error_handler(err);
    }
}

fn run(args: Args) -> Result<()> {
    let engine = MiniJinjaRenderer::new();
    let prompt: Box<dyn Prompter> = if args.no_input {
        Box::new(NoInputPrompter)
    } else {
        Box::new(DialoguerPrompter::new())
    };

    let working_dir = std::env::current_dir()?;
    let context = build_context(&args, &working_dir, &*prompt)?;
    for (key, value) in context.iter() {
        log::debug!("{key} = {value:?}");
    }

    let options = GenerateOptions { force: args.force_delete, skip_non_text: args.skip_binary };
    let summary = Generator::new(&engine, &*prompt, options).generate(&context)?;

    println!(
        "Generated {} directories and {} files in {}.",
        summary.directories,
        summary.files,
        context.output_dir().display()
    );
    Ok(())
}
