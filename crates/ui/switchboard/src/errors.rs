use std::panic::PanicHookInfo;
use std::sync::OnceLock;

use color_eyre::{config::PanicHook, Result};
use tracing::error;

use crate::{config, logging};

static INSTALLED: OnceLock<()> = OnceLock::new();

/// Install the eyre report handler and the panic hook. Safe to call twice.
pub fn init() -> Result<()> {
    if INSTALLED.get().is_some() {
        return Ok(());
    }

    let (panic_hook, eyre_hook) = color_eyre::config::HookBuilder::default()
        .panic_section(panic_section())
        .capture_span_trace_by_default(false)
        .display_location_section(false)
        .display_env_section(false)
        .try_into_hooks()?;
    eyre_hook.install()?;
    std::panic::set_hook(Box::new(move |info| on_panic(&panic_hook, info)));

    let _ = INSTALLED.set(());
    Ok(())
}

/// Footer of every panic report.
fn panic_section() -> String {
    format!(
        "The form crashed. The session log is at {}.\n\
         Run again with {}=debug to log every form transition.",
        logging::log_path().display(),
        *logging::LOG_ENV,
    )
}

fn on_panic(panic_hook: &PanicHook, info: &PanicHookInfo<'_>) {
    // Raw Mode zuerst verlassen, sonst ist der Report unlesbar
    if let Err(err) = crate::tui::restore() {
        error!("Unable to restore the terminal: {err:?}");
    }

    let report = panic_hook.panic_report(info).to_string();
    error!(
        project = %config::PROJECT_NAME.as_str(),
        "panic: {}",
        strip_ansi_escapes::strip_str(&report)
    );

    #[cfg(not(debug_assertions))]
    {
        use human_panic::{handle_dump, metadata, print_msg};
        let metadata = metadata!();
        let dump = handle_dump(&metadata, info);
        if print_msg(dump, &metadata).is_err() {
            eprintln!("{report}");
        }
    }

    #[cfg(debug_assertions)]
    {
        better_panic::Settings::auto()
            .most_recent_first(false)
            .lineno_suffix(true)
            .verbosity(better_panic::Verbosity::Full)
            .create_panic_handler()(info);
    }

    std::process::exit(libc::EXIT_FAILURE);
}
