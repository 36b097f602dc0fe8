use std::path::PathBuf;
use std::sync::Arc;

use log::LevelFilter;
use mcq_bridge::{ContentDimensions, LoopbackBridge, PlatformEvent};
use mcq_core::{McqOption, McqResponse, Question};
use mcq_logging::{mcq_info, mcq_warn};
use mcq_view::{
    activate, initialize_logging, read_config, ActiveView, ConfigError, ManualSurface,
    RecordingShell, ViewConfig, ViewDeps,
};

const DEFAULT_CONFIG: &str = "mcq_view.ron";

/// Drives the MCQ view through a full answer cycle against an in-process host.
fn main() -> anyhow::Result<()> {
    let config_path = std::env::args()
        .nth(1)
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from(DEFAULT_CONFIG));
    let (config, config_error) = match read_config(&config_path) {
        Ok(config) => (config, None),
        Err(ConfigError::Io(err)) if err.kind() == std::io::ErrorKind::NotFound => {
            (ViewConfig::default(), None)
        }
        Err(err) => (ViewConfig::default(), Some(err)),
    };
    initialize_logging(config.log_destination, LevelFilter::Info, &config.log_file);
    if let Some(err) = config_error {
        mcq_warn!("Using default config, {:?} is unusable: {}", config_path, err);
    }

    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()?;
    runtime.block_on(run(config));
    Ok(())
}

async fn run(config: ViewConfig) {
    let bridge = Arc::new(LoopbackBridge::new());
    bridge.add_screenshot("/captures/q1.png", "data:image/png;base64,AAAA");
    bridge.add_screenshot("/captures/q2.png", "data:image/png;base64,BBBB");
    let surface = ManualSurface::new(Some(ContentDimensions {
        width: 480,
        height: 320,
    }));
    let shell = Arc::new(RecordingShell::new());
    let store = config.cache_store();

    let deps = || ViewDeps {
        bridge: bridge.clone(),
        cache: config.result_cache(store.clone()),
        surface: Arc::new(surface.clone()),
        shell: shell.clone(),
        runtime: tokio::runtime::Handle::current(),
        messages: config.messages.clone(),
    };

    let view = activate(deps());
    bridge.emit(PlatformEvent::Start);
    view.settled().await;
    bridge.emit(PlatformEvent::Status {
        message: "Generating answers...".to_string(),
        progress: 50.0,
    });
    bridge.emit(PlatformEvent::Success(sample_result()));
    view.settled().await;
    surface.resize(ContentDimensions {
        width: 480,
        height: 640,
    });
    view.delete_screenshot(0);
    view.settled().await;
    summarize("after success", &view);
    view.deactivate();

    let remounted = activate(deps());
    summarize("after remount", &remounted);
    bridge.emit(PlatformEvent::Reset);
    summarize("after reset", &remounted);

    mcq_info!(
        "host saw {} dimension report(s), {} navigation(s), {} toast(s)",
        bridge.reported_dimensions().len(),
        shell.views().len(),
        shell.toasts().len()
    );
}

fn summarize(label: &str, view: &ActiveView) {
    let model = view.view();
    println!(
        "{label}: spinner={} results={} screenshots={}",
        model.show_spinner,
        model.questions.len(),
        model.screenshots.len()
    );
    for question in &model.questions {
        println!(
            "  Question {} of {}: {} -> {}",
            question.number, question.total, question.prompt, question.correct_label
        );
    }
}

fn sample_result() -> McqResponse {
    McqResponse {
        questions: vec![Question {
            prompt: "2+2?".to_string(),
            options: vec![
                McqOption {
                    label: "A".to_string(),
                    text: "3".to_string(),
                },
                McqOption {
                    label: "B".to_string(),
                    text: "4".to_string(),
                },
            ],
            correct_label: "B".to_string(),
            explanation: "basic arithmetic".to_string(),
        }],
    }
}
