fn main() {
    dashboard_app::init_tracing();

    let demo_mode = std::env::args().any(|arg| arg == "--demo");
    let result = if demo_mode {
        dashboard_app::run_demo()
    } else {
        dashboard_app::run()
    };

    if let Err(err) = result {
        tracing::error!(%err, "dashboard backend failed");
        std::process::exit(1);
    }
}
