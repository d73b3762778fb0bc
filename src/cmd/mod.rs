mod list;
mod show;
mod watch;

pub use list::list;
pub use show::show;
pub use watch::watch;
