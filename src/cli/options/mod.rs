//! Options command - prints the accepted input choices as JSON

use crate::api::types::OptionsResponse;

pub async fn run() -> anyhow::Result<()> {
    let config = super::bootstrap()?;

    let service = crate::create_prediction_service(&config).await?;
    let response = OptionsResponse::from_domain(service.options(), &config.presentation);
    println!("{}", serde_json::to_string_pretty(&response)?);

    Ok(())
}
