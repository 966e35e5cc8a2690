use eframe::egui;
use noise_labeler::app::NoiseLabelerApp;
use noise_labeler::config::LabelerConfig;
use noise_labeler::state::LabelerSession;

fn main() -> eframe::Result {
    env_logger::init();

    let config = LabelerConfig::default();

    let Some(input_dir) = rfd::FileDialog::new()
        .set_title("Open raw data files")
        .set_directory(".")
        .pick_folder()
    else {
        log::info!("No input folder chosen, exiting");
        return Ok(());
    };
    let Some(output_dir) = rfd::FileDialog::new()
        .set_title("Open JSON output folder")
        .set_directory(".")
        .pick_folder()
    else {
        log::info!("No output folder chosen, exiting");
        return Ok(());
    };

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size(config.window_size)
            .with_min_inner_size([800.0, 400.0]),
        ..Default::default()
    };

    let mut session = LabelerSession::new(input_dir, output_dir, config);
    // The window opens either way; the status line shows what went wrong.
    let _ = session.initialize();

    eframe::run_native(
        "Noise Labeler",
        options,
        Box::new(|_cc| Ok(Box::new(NoiseLabelerApp::new(session)))),
    )
}
