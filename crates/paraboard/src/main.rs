use clap::Parser;
use paraboard::config::Args;
use paraboard::{logging, App, JsonFileStore, MemoryStore, Program, ProgramError, Settings, SettingsStore};
use tracing::{info, warn};

#[tokio::main]
async fn main() -> Result<(), ProgramError> {
    let args = Args::parse();
    let _guard = logging::init_tracing(args.log_file.as_deref())?;

    let app = match args.settings_path() {
        Some(path) => {
            let mut store = JsonFileStore::new(path);
            if args.reset_settings {
                store.save(&Settings::default())?;
            }
            info!(path = %store.path().display(), "using settings file");
            App::new(store, args.key_delay())
        }
        None => {
            warn!("no config directory, settings will not be saved");
            App::new(MemoryStore::new(), args.key_delay())
        }
    };

    let app = Program::new(app, args.program_options())?.run().await?;
    info!(chars = app.model().text.chars().count(), "exited");
    Ok(())
}
