use anyhow::Result;
use clap::{Parser, Subcommand};
use fluidspace_common::{Color, ParticleFlags, SurfaceId};
use fluidspace_physics::{HeadlessWorld, SpawnShape};
use fluidspace_render::{
    BorderStyle, DebugDraw, DialCounters, InstanceConfig, InstanceRenderer,
    MultiInstanceCoordinator, generate_hands,
};
use glam::Vec2;
use std::time::Instant;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "fluidspace-cli", about = "Headless fluidspace instance driver")]
struct Cli {
    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run one instance for a number of frames and print a summary
    Run {
        /// Frames to drive
        #[arg(short, long, default_value = "120")]
        frames: u32,
        /// Surface size, pixels
        #[arg(long, default_value = "400")]
        width: u32,
        #[arg(long, default_value = "800")]
        height: u32,
        /// Particle ceiling
        #[arg(long, default_value = "12000")]
        ceiling: usize,
        /// Honor the advisory frame pacing instead of free-running
        #[arg(long)]
        paced: bool,
    },
    /// Run two isolated instances side by side
    Multi {
        #[arg(short, long, default_value = "120")]
        frames: u32,
    },
    /// Print dial-hand geometry for given counter values
    Dial {
        #[arg(long, default_value = "0")]
        second: f32,
        #[arg(long, default_value = "0")]
        minute: f32,
        #[arg(long, default_value = "40")]
        hour: f32,
        #[arg(long, default_value = "25")]
        radius: f32,
        /// Border wall thickness the hands scale against
        #[arg(long, default_value = "2")]
        thickness: f32,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let filter = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::new(filter))
        .init();

    match cli.command {
        Commands::Run {
            frames,
            width,
            height,
            ceiling,
            paced,
        } => run_single(frames, width, height, ceiling, paced),
        Commands::Multi { frames } => run_multi(frames),
        Commands::Dial {
            second,
            minute,
            hour,
            radius,
            thickness,
        } => {
            print_dial(second, minute, hour, radius, thickness);
            Ok(())
        }
    }
}

fn run_single(frames: u32, width: u32, height: u32, ceiling: usize, paced: bool) -> Result<()> {
    let config = InstanceConfig {
        particle_ceiling: ceiling,
        ..InstanceConfig::default()
    };
    let reference = config.reference_extent;
    let mut instance = InstanceRenderer::new(SurfaceId(0), config, DebugDraw::new())
        .with_dial(DialCounters::starting_at(0, 0.0, 40.0));

    instance.initialize(HeadlessWorld::new())?;
    instance.on_surface_created()?;
    instance.on_surface_resized(width, height)?;
    instance.start()?;

    for frame in 0..frames {
        instance.on_frame_tick()?;
        // Mid-run mutations, as UI buttons would issue them.
        if frame == frames / 3 {
            let added = instance.add_material(
                ParticleFlags::WATER | ParticleFlags::MIX_COLOR,
                Color::new(30, 144, 255, 220),
                SpawnShape::Circle {
                    center: Vec2::splat(reference / 2.0),
                    radius: 0.5,
                },
            )?;
            tracing::info!(added, "water added");
        }
        if frame == 2 * frames / 3 {
            let removed = instance.remove_material(100)?;
            tracing::info!(removed, "water removed");
        }
        if paced {
            let budget = instance.throttle_budget(Instant::now());
            if !budget.is_zero() {
                std::thread::sleep(budget);
            }
        }
    }

    let extent = instance.view().extent();
    println!("=== {} after {frames} frames ===", instance.surface_id());
    println!("world: {:.1} x {:.1}", extent.width, extent.height);
    println!("particles: {}", instance.particle_count());
    println!("frame rate: {}", instance.frame_rate());
    if let Some(frame) = instance.draw_target().last_frame() {
        println!(
            "last frame: {} particle vertices, {} overlay shapes",
            frame.particle_vertices, frame.overlay_shapes
        );
    }

    instance.destroy()?;
    Ok(())
}

fn run_multi(frames: u32) -> Result<()> {
    let boxed = InstanceConfig::default();
    let rounded = InstanceConfig {
        border_style: BorderStyle::Rounded,
        ..InstanceConfig::default()
    };

    let mut first = InstanceRenderer::new(SurfaceId(1), boxed, DebugDraw::new());
    let mut second = InstanceRenderer::new(SurfaceId(2), rounded, DebugDraw::new());
    first.initialize(HeadlessWorld::new())?;
    second.initialize(HeadlessWorld::new())?;

    let mut multi = MultiInstanceCoordinator::new(first, second)?;
    for id in multi.surfaces() {
        let instance = multi
            .instance_mut(id)
            .expect("surface registered above");
        instance.on_surface_created()?;
        instance.on_surface_resized(800, 400)?;
    }
    multi.start_all()?;

    for _ in 0..frames {
        multi.on_frame_tick_all()?;
    }

    for id in multi.surfaces() {
        let instance = multi.instance(id).expect("surface registered above");
        println!(
            "{id}: {} particles, rate {}",
            instance.particle_count(),
            instance.frame_rate()
        );
    }
    multi.destroy_all()?;
    Ok(())
}

fn print_dial(second: f32, minute: f32, hour: f32, radius: f32, thickness: f32) {
    let names = ["second", "minute", "hour"];
    let hands = generate_hands(second, minute, hour, radius, thickness);
    for (name, hand) in names.iter().zip(hands.iter()) {
        println!(
            "{name}: center=({:.3}, {:.3}) half=({:.3}, {:.3}) angle={:.4}",
            hand.center.x, hand.center.y, hand.half_width, hand.half_height, hand.angle
        );
    }
}
