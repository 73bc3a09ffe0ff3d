/// Respect the NO_COLOR convention
pub fn init_color() {
    if std::env::var_os("NO_COLOR").is_some() {
        colored::control::set_override(false);
    }
}
