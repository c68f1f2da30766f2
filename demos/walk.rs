//! Walks a turtle script over a solid, checks that its face crossings can
//! be recovered from the drawn points, and replays them as rolls. Each pen
//! lift starts the solid over from its resting pose.
//!
//! Usage:
//! ```text
//! cargo run --example walk                         # cube, built-in script
//! cargo run --example walk -- icosahedron          # another shape
//! cargo run --example walk -- dc-hexagon path.txt  # script from a file
//! ```

use polyroll::operations::roll::{orientation_label_for_pose, ReplayRolls};
use polyroll::operations::turtle::{
    extract_edge_crossings, generate_flat_path, generate_path, parse_commands, EdgeCrossing,
};
use polyroll::{get_polyhedron, PolyrollError, ShapeId};

const DEFAULT_SCRIPT: &str = "start 0 0\nfd 0.8\nrt 90\nfd 1.5\nlt 45\nfd 2\nstart 0.1 0.1\nbk 1.2";

fn main() -> Result<(), PolyrollError> {
    // Default: WARN for everything, INFO for polyroll.
    // Override with RUST_LOG (e.g. RUST_LOG=polyroll=debug).
    let env_filter = tracing_subscriber::EnvFilter::from_default_env()
        .add_directive(tracing_subscriber::filter::LevelFilter::WARN.into())
        .add_directive("walk=info".parse().unwrap_or_default())
        .add_directive("polyroll=info".parse().unwrap_or_default());
    tracing_subscriber::fmt().with_env_filter(env_filter).init();

    let mut args = std::env::args().skip(1);
    let shape: ShapeId = match args.next() {
        Some(name) => name.parse()?,
        None => ShapeId::Cube,
    };
    let script = match args.next() {
        Some(file) => std::fs::read_to_string(&file).unwrap_or_else(|err| {
            tracing::warn!(%file, %err, "could not read script, using the built-in one");
            DEFAULT_SCRIPT.to_owned()
        }),
        None => DEFAULT_SCRIPT.to_owned(),
    };

    let definition = get_polyhedron(shape)?;
    let commands = parse_commands(&script);
    println!("{} ({}): {} commands", definition.name, shape, commands.len());

    let path = generate_path(shape, &commands)?;
    for (i, segment) in path.segments.iter().enumerate() {
        println!("segment {i}: {} points, length {:.3}", segment.points.len(), segment.length());
    }
    if let Some(error) = &path.error {
        println!("stopped: {error}");
    }

    let flat = generate_flat_path(shape, &commands)?;
    let flat_length: f64 = flat.iter().map(|s| s.length()).sum();
    println!("flat path length {flat_length:.3}");

    // Points alone should give back the same face changes the walker saw.
    let recovered = extract_edge_crossings(shape, &path.segments)?;
    let key = |c: &EdgeCrossing| (c.segment_index, c.from_face, c.to_face, c.edge);
    let mismatch = path
        .edge_rolls
        .iter()
        .map(key)
        .zip(recovered.iter().map(key))
        .position(|(a, b)| a != b);
    match mismatch {
        None if recovered.len() == path.edge_rolls.len() => {
            println!("{} crossings, all recovered from points", recovered.len());
        }
        None => println!(
            "{} crossings recorded, {} recovered from points",
            path.edge_rolls.len(),
            recovered.len()
        ),
        Some(i) => {
            let (want, got) = (key(&path.edge_rolls[i]), key(&recovered[i]));
            tracing::warn!(crossing = i, ?want, ?got, "recovered crossings disagree");
            println!("crossing {i}: recorded {want:?}, recovered {got:?}");
        }
    }

    for step in ReplayRolls::new(definition, &path.edge_rolls).execute()? {
        let at = step.pose.floor_center();
        println!(
            "roll {:>2}: {:<3} onto face {:>2} at ({:.3}, {:.3}) facing {}",
            step.crossing,
            step.move_data().label,
            step.resting_face,
            at.x,
            at.z,
            orientation_label_for_pose(definition, &step.pose)
        );
    }
    Ok(())
}
