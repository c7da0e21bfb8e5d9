//! Entry point: installs panic/console logging and enhances the page.

fn main() {
    // Set the panic hook to log detailed errors to the console
    console_error_panic_hook::set_once();
    timeline_navigator::logging::init();
    if let Err(e) = timeline_navigator::start() {
        log::error!("Page enhancer not started: {}", e);
    }
}
