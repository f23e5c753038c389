use std::time::Duration;
use log::LevelFilter;

pub trait Config: Send + Sync {
    /// Base url of the contacts backend, e.g. `http://localhost:3333`.
    fn api_url(&self) -> &str;

    /// Overall timeout applied to every request.
    fn timeout(&self) -> Duration;

    /// Directory holding the persisted session file.
    fn data_dir(&self) -> &str;

    fn log_level(&self) -> LevelFilter;
    fn log_file(&self) -> Option<&str>;

    #[cfg(feature = "inspect")]
    fn dump(&self);
}
