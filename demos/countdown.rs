//! Runs a countdown on a calloop event loop and logs every rendered frame.
//!
//! `RUST_LOG=debug cargo run --example countdown`

use std::time::Duration;

use calloop::ping::make_ping;
use calloop::EventLoop;
use countdown_ring::prelude::*;
use countdown_ring::reactive::{init_wakeup, take_change_flags, take_frame_request};

fn main() -> std::result::Result<(), Box<dyn std::error::Error>> {
    env_logger::init();

    let mut event_loop: EventLoop<'static, ()> = EventLoop::try_new()?;

    // Signal writes ping the loop so dispatch returns promptly
    let (ping, ping_source) = make_ping()?;
    event_loop
        .handle()
        .insert_source(ping_source, |_, _, _| {})
        .map_err(|err| err.error)?;
    init_wakeup(ping);

    let config = RingConfig::new(vec![Color::from_hex(0xFF2D55), Color::from_hex(0xFF9500)])
        .text_colors(vec![Color::WHITE, Color::rgb(0.8, 0.8, 0.85)])
        .width_multiplier(1.2)
        .countdown_interval(0.8);

    let ring = CountdownRing::new(config)?.on_finished(|| log::info!("Go!"));

    let label = ring.state().label.clone();
    let _label_effect = create_effect(move || {
        log::info!("label: {}", label.get());
    });

    let size = Size::new(320.0, 240.0);
    let mut animator = RingAnimator::new(ring.config(), &ring.snapshot());

    ring.start(&LoopScheduler::new(event_loop.handle()))?;

    loop {
        event_loop.dispatch(Some(Duration::from_millis(16)), &mut ())?;

        let changes = take_change_flags();
        if !take_frame_request() && !animator.is_animating() {
            if ring.is_finished() {
                break;
            }
            continue;
        }

        if changes.contains(ChangeFlags::NEEDS_LAYOUT) {
            log::debug!("label changed, re-measuring");
        }

        let state = animator.advance(&ring.snapshot());
        let frame = RingFrame::new(size, ring.config(), &state);
        let (vertices, indices) = frame.to_vertices(size.width, size.height);
        log::debug!(
            "frame: {:.1} degrees, stroke {:.1}, label {:?} at {:.0}pt, {} vertices, {} indices",
            state.degrees,
            frame.progress.line_width,
            frame.label.text,
            frame.label.font_size,
            vertices.len(),
            indices.len()
        );
    }

    Ok(())
}
