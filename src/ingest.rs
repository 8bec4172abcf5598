use tokio::io::{AsyncBufRead, AsyncBufReadExt, BufReader};
use tracing::{error, info, warn};

use crate::processor::{message_processor, LocationTracker};

/// Reads newline-delimited JSON waypoints from stdin until EOF.
pub async fn consume_stdin(tracker: &LocationTracker) -> anyhow::Result<()> {
    consume_lines(tracker, BufReader::new(tokio::io::stdin())).await?;
    Ok(())
}

/// Feeds each line to the processor in order. A failing message is logged
/// and does not stop the loop; returns the number of recorded waypoints.
pub async fn consume_lines<R>(tracker: &LocationTracker, reader: R) -> anyhow::Result<usize>
where
    R: AsyncBufRead + Unpin,
{
    info!("Waiting for waypoint messages");

    // Raw bytes: a line that is not UTF-8 is a bad message, not the end of input.
    let mut lines = reader.split(b'\n');
    let mut recorded = 0;
    while let Some(line) = lines.next_segment().await? {
        if line.iter().all(u8::is_ascii_whitespace) {
            warn!("Received empty line on input");
            continue;
        }
        match message_processor::process_message(tracker, &line).await {
            Ok(Some(_)) => recorded += 1,
            Ok(None) => {}
            Err(e) => error!("Error processing message: {}", e),
        }
    }

    info!("Input closed after {} recorded waypoints", recorded);
    Ok(recorded)
}
