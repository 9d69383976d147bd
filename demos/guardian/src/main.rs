//! guardian — smallest end-to-end demo of the mob_ai framework.
//!
//! A forest guardian patrols its grove while three villagers wander around
//! it and a prowler hunts whatever comes close.  Everything runs on the
//! in-memory `FlatWorld`; swap in your engine's `WorldQuery` implementation
//! to drive real entities.
//!
//! Run with `RUST_LOG=mob_scheduler=debug` to watch arbitration decisions.

use anyhow::Result;
use tracing::info;
use tracing_subscriber::EnvFilter;

use mob_behavior::presets::{
    HuntPolicy, PanicPolicy, SocialPolicy, TerritorialPolicy, WanderPolicy,
};
use mob_core::{AgentHandle, Tick, Vec3};
use mob_scheduler::SchedulerConfig;
use mob_sim::{TickDriver, TickObserver};
use mob_world::{FlatWorld, WorldQuery};

// ── Constants ─────────────────────────────────────────────────────────────────

const SEED:  u64 = 42;
const TICKS: u64 = 200;

const GROVE_CENTER: Vec3 = Vec3::new(0.5, 0.0, 0.5);
const GROVE_RADIUS: f64 = 8.0;

// ── Observer ──────────────────────────────────────────────────────────────────

struct ProgressPrinter {
    interval: u64,
}

impl TickObserver for ProgressPrinter {
    fn on_tick_end(&mut self, tick: Tick, agents: usize) {
        if tick.0 % self.interval == 0 {
            println!("  {tick}: {agents} agents updated");
        }
    }
}

// ── main ──────────────────────────────────────────────────────────────────────

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    println!("=== guardian — mob_ai demo ===");
    println!("Ticks: {TICKS}  |  Seed: {SEED}");
    println!();

    // 1. Terrain: flat grove with a pond to the east and a wall of rocks
    //    to the north.  The navigator has to probe around both.
    let mut world = FlatWorld::new();
    for z in -2..=2 {
        world.set_liquid(6, -1, z);
        world.set_liquid(7, -1, z);
    }
    for x in -4..=4 {
        world.set_obstacle(x, 0, 9);
        world.set_obstacle(x, 1, 9);
    }

    // 2. Agents.
    let guardian = world.spawn(GROVE_CENTER);
    let villagers: Vec<AgentHandle> = [(3.5, 2.5), (-2.5, 3.5), (-3.5, -2.5)]
        .into_iter()
        .map(|(x, z)| world.spawn(Vec3::new(x, 0.0, z)))
        .collect();
    let prowler = world.spawn(Vec3::new(14.5, 0.0, 14.5));

    // 3. Behavior stacks.
    let mut driver = TickDriver::new(SEED);

    driver.register_agent(guardian, SchedulerConfig::default())?;
    let scheduler = driver.scheduler_mut(guardian).expect("just registered");
    scheduler.add_policy(Box::new(PanicPolicy::new(GROVE_CENTER, 0.8, 3.0)?))?;
    scheduler.add_policy(Box::new(TerritorialPolicy::new(GROVE_CENTER, GROVE_RADIUS)?))?;
    scheduler.add_policy(Box::new(SocialPolicy::new(GROVE_CENTER)?))?;
    scheduler.add_policy(Box::new(WanderPolicy::new(GROVE_CENTER, GROVE_RADIUS)?))?;

    for &villager in &villagers {
        let home = world.position(villager);
        driver.register_agent(villager, SchedulerConfig::default())?;
        let scheduler = driver.scheduler_mut(villager).expect("just registered");
        scheduler.add_policy(Box::new(SocialPolicy::new(home)?))?;
        scheduler.add_policy(Box::new(WanderPolicy::new(home, 5.0)?))?;
    }

    let prowler_home = world.position(prowler);
    driver.register_agent(prowler, SchedulerConfig::default())?;
    let scheduler = driver.scheduler_mut(prowler).expect("just registered");
    scheduler.add_policy(Box::new(HuntPolicy::new(12.0)?))?;
    scheduler.add_policy(Box::new(WanderPolicy::new(prowler_home, 6.0)?))?;

    info!(agents = driver.agent_count(), seed = SEED, "simulation wired");
    println!("Registered {} agents", driver.agent_count());
    println!();

    // 4. Run.  FlatWorld has no physics step of its own, so integrate the
    //    recorded velocities once per tick.
    let mut observer = ProgressPrinter { interval: 25 };
    for _ in 0..TICKS {
        driver.run_ticks(1, &mut world, &mut observer);
        world.integrate();
    }
    println!();

    // 5. Final state table.
    println!("{:<12} {:<22} {:<10} {:<10}", "Agent", "Position", "Primary", "Active");
    println!("{}", "-".repeat(56));
    let mut roster = vec![("guardian", guardian), ("prowler", prowler)];
    for (i, &villager) in villagers.iter().enumerate() {
        roster.push((["villager-a", "villager-b", "villager-c"][i], villager));
    }
    for (name, agent) in roster {
        let pos = world.position(agent);
        let scheduler = driver.scheduler(agent).expect("registered");
        let primary = scheduler
            .primary()
            .map_or_else(|| "-".to_string(), |id| id.to_string());
        println!(
            "{:<12} {:<22} {:<10} {:<10}",
            name,
            format!("({:.1}, {:.1}, {:.1})", pos.x, pos.y, pos.z),
            primary,
            scheduler.concurrent().len() + usize::from(scheduler.primary().is_some()),
        );
    }

    Ok(())
}
