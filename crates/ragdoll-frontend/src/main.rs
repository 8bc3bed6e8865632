//! Ragdoll Adjuster main entry point

fn main() -> eframe::Result<()> {
    use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "ragdoll_frontend=debug,ragdoll_core=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!("Starting Ragdoll Adjuster");

    let native_options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([900.0, 700.0])
            .with_min_inner_size([600.0, 400.0])
            .with_title("Ragdoll Adjuster"),
        ..Default::default()
    };

    eframe::run_native(
        "ragdoll-adjuster",
        native_options,
        Box::new(|cc| Ok(Box::new(ragdoll_frontend::RagdollAdjusterApp::new(cc)))),
    )
}
