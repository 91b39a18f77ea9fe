//! Request command handler

use super::utils::{build_provider, encode_payload, read_payload};
use crate::cli::RequestArgs;
use crate::config::Config;
use crate::error::Result;
use crate::logging::timing::Timer;
use crate::output::OutputWriter;
use mayar_core::HttpMethod;

/// Handle the request command
///
/// Returns whether the envelope reported success.
pub async fn handle_request(
    args: RequestArgs,
    config: &Config,
    sandbox: bool,
    output: &mut OutputWriter,
) -> Result<bool> {
    let method: HttpMethod = args.method.parse()?;
    let payload = encode_payload(read_payload(args.data.as_deref())?, args.encoding)?;
    let provider = build_provider(config, sandbox)?;

    output.info(&format!("{} {} ({})", method, args.path, payload.encoding()))?;

    let response = {
        let _timer = Timer::with_details("request", &args.path);
        provider.request(method.as_str(), &args.path, payload).await?
    };

    tracing::info!(
        status_code = response.status_code(),
        success = response.is_success(),
        "Request finished"
    );

    output.envelope(&response)?;
    Ok(response.is_success())
}
