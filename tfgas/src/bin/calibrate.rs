//! Gas Bricklet calibration utility
//!
//! Connects to the local brickd, shows the device calibration, writes
//! the reference record and shows the result. Run interactively; any
//! failure terminates with the error chain as diagnostic.

use tfgas::calibrate::{self, CalibrationConfig, ConsolePrompt, REFERENCE_CALIBRATION};
use tfgas::GasBricklet;

#[tokio::main]
async fn main() -> tfgas::Result<()> {
    tracing_subscriber::fmt()
        .with_max_level(tracing::Level::INFO)
        .init();

    let config = CalibrationConfig::default();

    let mut gas = GasBricklet::new(&config.uid, config.host.clone(), config.port)?;
    let mut prompt = ConsolePrompt;

    calibrate::run(
        &mut gas,
        &REFERENCE_CALIBRATION,
        &mut prompt,
        &mut std::io::stdout(),
    )
    .await
}
