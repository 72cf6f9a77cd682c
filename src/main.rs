/*
 *  main.rs
 *
 *  HeapLogViewer - worth the squeeze
 *  (c) 2020-26 Stuart Hunter
 *
 *  This program is free software: you can redistribute it and/or modify
 *  it under the terms of the GNU General Public License as published by
 *  the Free Software Foundation, either version 3 of the License, or
 *  (at your option) any later version.
 *
 *  This program is distributed in the hope that it will be useful,
 *  but WITHOUT ANY WARRANTY; without even the implied warranty of
 *  MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE.  See the
 *  GNU General Public License for more details.
 *
 *  See <http://www.gnu.org/licenses/> to get a copy of the GNU General
 *  Public License.
 *
 */

use anyhow::{bail, Context, Result};
use env_logger::Env;
use log::{debug, info, warn};

use heaplog_viewer::config;
use heaplog_viewer::display::export::save_png;
use heaplog_viewer::display::{to_hex, SurfaceRegistry, DEFAULT_SURFACE_ID};
use heaplog_viewer::{HeapLog, HeapState, HeapViewer};

include!(concat!(env!("OUT_DIR"), "/build_info.rs"));

fn main() -> Result<()> {
    let (cfg, cli) = config::load().context("loading configuration")?;

    if cli.dump_config {
        print!("{}", serde_yaml::to_string(&cfg)?);
        return Ok(());
    }

    let level = if cli.debug {
        "debug".to_string()
    } else {
        cfg.log_level.clone().unwrap_or_else(|| "info".to_string())
    };
    env_logger::Builder::from_env(Env::default().default_filter_or(level))
        .format_timestamp_secs()
        .init();

    info!("This {} worth the Squeeze", env!("CARGO_PKG_NAME"));
    info!("v.{} built {}", env!("CARGO_PKG_VERSION"), BUILD_DATE);

    let Some(log_path) = cli.log.as_ref() else {
        bail!("no heap log given, see --help");
    };

    let heap_log = HeapLog::from_path(log_path)
        .with_context(|| format!("reading heap log {}", log_path.display()))?;
    if heap_log.is_truncated() {
        warn!("{} was not closed cleanly, showing what was logged", log_path.display());
    }
    if heap_log.is_capped() {
        info!("{} hit the message cap, allocations are still complete", log_path.display());
    }

    // engine messages go out through our own logger
    for msg in heap_log.messages() {
        log::log!(target: "heaplog", msg.level.to_log_level(), "{} {}", msg.location, msg.text);
    }

    let heap = HeapState::replay(heap_log.alloc_events());
    let stats = heap.stats();
    debug!("replay stats {:?}", stats);

    let viewer = HeapViewer::from_config(&cfg)?;
    let background = cfg.background()?;
    let size = viewer.layout().canvas_size();
    debug!("canvas {}x{} on {}", size.width, size.height, to_hex(background));

    let mut surfaces = SurfaceRegistry::new();
    surfaces.insert(DEFAULT_SURFACE_ID, viewer.frame_canvas(background));

    let summary = viewer.render(&mut surfaces, DEFAULT_SURFACE_ID, &heap);
    if summary.clipped > 0 {
        warn!("{} blocks ran past the last row at scale {}", summary.clipped, summary.scale);
    }

    let Some(canvas) = surfaces.remove(DEFAULT_SURFACE_ID) else {
        bail!("canvas '{}' went missing", DEFAULT_SURFACE_ID);
    };
    save_png(canvas.target(), &cli.output)
        .with_context(|| format!("writing {}", cli.output.display()))?;

    info!(
        "{} live blocks ({} bytes) at {} bytes/pixel -> {}",
        heap.live_count(),
        heap.live_bytes(),
        summary.scale,
        cli.output.display()
    );
    Ok(())
}
