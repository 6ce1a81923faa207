//! Ls command - the styled, grouped task listing.

use std::path::Path;

use crate::error_fmt::AppError;
use crate::filter::Filter;
use crate::render;
use crate::settings::Settings;
use crate::store::TaskStore;
use crate::style::Theme;

/// List all tasks matching the filter arguments, grouped by list and
/// sorted by completion state, priority, and due date.
pub fn ls(dir: &Path, filter_args: &[String]) -> Result<(), AppError> {
    let settings = Settings::load(&dir.join("config.yml"))?;
    let theme = Theme::from_config(&settings.styles)?;
    let filter = Filter::parse(&filter_args.join(" "))?;

    let store = TaskStore::load(dir)?;
    let tasks = store.tasks(&filter);

    if tasks.is_empty() {
        println!("No tasks found");
        return Ok(());
    }

    for line in render::render_listing(&tasks, &settings.dateformat) {
        println!("{}", theme.paint(&line));
    }

    Ok(())
}
