//! CLI command implementations.

use sartor_io::{validate_input, FitInput, FitReport, ResultSnapshot};
use sartor_pipeline::{run_character, BatchItem, CancelToken, FitParams};
use sartor_scene::Document;
use sartor_telemetry::{EventBus, TracingSink};

/// Run a fitting pass from an input file.
pub fn fit(
    input_path: &str,
    output_path: Option<&str>,
    snapshot_dir: Option<&str>,
) -> Result<(), Box<dyn std::error::Error>> {
    println!("Sartor Fitting Run");
    println!("──────────────────");
    println!("Input: {input_path}");
    println!();

    let content = std::fs::read_to_string(input_path)?;
    let input: FitInput = serde_json::from_str(&content)?;
    validate_input(&input)?;

    let mut doc = Document::new();
    let body = doc.add_object(input.body.into_object()?);
    let armature = doc.add_armature(input.armature.into_armature());

    let mut items = Vec::new();
    for garment in input.garments {
        let name = garment.name.clone();
        let id = doc.add_object(garment.into_object()?);
        items.push(BatchItem { name, garment: id });
    }
    let mut bus = EventBus::new();
    bus.add_sink(Box::new(TracingSink::new(tracing::Level::INFO)));

    let cancel = CancelToken::new();
    let character = run_character(
        &mut doc,
        body,
        armature,
        &input.joint_sets,
        &input.drivers,
        &items,
        &input.params,
        &mut bus,
        &cancel,
    )?;

    println!("Bones corrected:   {}", character.corrected_bones);
    println!("Drivers re-bound:  {}", character.drivers_bound);
    println!(
        "Garments:          {} fitted, {} failed",
        character.batch.completed, character.batch.failed
    );
    for item in &character.batch.items {
        match (&item.summary, &item.error) {
            (Some(summary), _) => println!(
                "  {}: {} verts, {} masked, max offset {:.4}m",
                item.name, summary.target_vertices, summary.masked_vertices, summary.max_offset
            ),
            (_, Some(error)) => println!("  {}: FAILED — {}", item.name, error),
            _ => {}
        }
    }
    println!();

    // Per-garment binary snapshots for later inspection.
    if let Some(dir) = snapshot_dir {
        std::fs::create_dir_all(dir)?;
        for item in &character.batch.items {
            if let Some(summary) = &item.summary {
                if let Some(id) = doc.find_object(&summary.garment) {
                    let snapshot =
                        ResultSnapshot::from_object(doc.object(id)?, summary.masked_vertices);
                    let path = format!("{}/{}.bin", dir, item.name);
                    std::fs::write(&path, snapshot.to_bytes())?;
                    println!("Snapshot written: {path}");
                }
            }
        }
    }

    let report = FitReport {
        character,
        object_count: doc.object_count(),
    };

    let json = serde_json::to_string_pretty(&report)?;
    if let Some(path) = output_path {
        std::fs::write(path, &json)?;
        println!("Report written to: {path}");
    } else {
        println!("{json}");
    }

    Ok(())
}

/// Validate a fitting input or parameter file.
pub fn validate(path: &str) -> Result<(), Box<dyn std::error::Error>> {
    println!("Sartor Validator");
    println!("────────────────");
    println!();

    if path.ends_with(".toml") {
        println!("Validating parameters: {path}");
        let content = std::fs::read_to_string(path)?;
        let _params: FitParams = toml::from_str(&content)?;
        println!("Parameters are valid.");
    } else if path.ends_with(".json") {
        println!("Validating fitting input: {path}");
        let content = std::fs::read_to_string(path)?;
        let input: FitInput = serde_json::from_str(&content)?;
        match validate_input(&input) {
            Ok(()) => println!(
                "Input is valid ({} body verts, {} garments, {} bones).",
                input.body.positions.len() / 3,
                input.garments.len(),
                input.armature.bones.len()
            ),
            Err(e) => println!("Input validation failed: {e}"),
        }
    } else {
        println!("Unsupported file format. Use .json (input) or .toml (parameters).");
    }

    Ok(())
}

/// Inspect a result snapshot.
pub fn inspect(path: &str) -> Result<(), Box<dyn std::error::Error>> {
    println!("Sartor Snapshot Inspector");
    println!("─────────────────────────");
    println!();

    let data = std::fs::read(path)?;
    let snapshot = ResultSnapshot::from_bytes(&data)?;

    println!("Garment:      {}", snapshot.garment);
    println!("Vertices:     {}", snapshot.vertex_count);
    println!("Pos entries:  {}", snapshot.positions.len());
    println!("Masked:       {}", snapshot.masked_vertices);

    // Quick stats
    if !snapshot.positions.is_empty() {
        let min_y = snapshot
            .positions
            .iter()
            .enumerate()
            .filter(|(i, _)| i % 3 == 1) // Y components
            .map(|(_, v)| *v)
            .fold(f32::INFINITY, f32::min);
        let max_y = snapshot
            .positions
            .iter()
            .enumerate()
            .filter(|(i, _)| i % 3 == 1)
            .map(|(_, v)| *v)
            .fold(f32::NEG_INFINITY, f32::max);
        println!("Y range:      [{:.4}, {:.4}]", min_y, max_y);
    }

    Ok(())
}

/// Run a procedural demo scenario through the full pipeline.
pub fn demo(scenario: &str) -> Result<(), Box<dyn std::error::Error>> {
    match scenario {
        "unit_square" => demo_unit_square(),
        "sphere_shell" => demo_sphere_shell(),
        other => {
            eprintln!("Unknown scenario: {other}");
            eprintln!("Available: unit_square, sphere_shell");
            Err("Unknown scenario".into())
        }
    }
}

/// Four source points forming a unit square, one target point floating
/// above the centroid; raising the square carries the target with it.
fn demo_unit_square() -> Result<(), Box<dyn std::error::Error>> {
    use sartor_mesh::MeshSnapshot;
    use sartor_scene::{MeshObject, ShapeKey};
    use sartor_transfer::{build_correspondence, replay};

    println!("Demo: unit square");
    println!("─────────────────");

    let mut square = MeshSnapshot::with_capacity(4);
    square.push(0.0, 0.0, 0.0);
    square.push(1.0, 0.0, 0.0);
    square.push(1.0, 1.0, 0.0);
    square.push(0.0, 1.0, 0.0);

    let mut target = MeshSnapshot::with_capacity(1);
    target.push(0.5, 0.5, 0.1);

    let table = build_correspondence(&square, &target)?;
    println!(
        "Correspondence: target 0 → source {} (offset length {:.4})",
        table.entry(0).source_index,
        table.entry(0).offset.length()
    );

    // Raise the square by dz through a shape key.
    let dz = 0.25f32;
    let mut body = MeshObject::new("square", square);
    body.add_shape_key(ShapeKey {
        name: "raise".into(),
        delta_x: vec![0.0; 4],
        delta_y: vec![0.0; 4],
        delta_z: vec![dz; 4],
        value: 1.0,
        driver: None,
    })?;

    let raised = body.evaluated_snapshot();
    let replayed = replay(&table, &raised)?;
    println!(
        "Target after raise by {dz}: [{:.3}, {:.3}, {:.3}]",
        replayed[0][0], replayed[0][1], replayed[0][2]
    );

    Ok(())
}

/// A spherical body with a loose shell garment; a widening shape key
/// reshapes the body and the shell tracks it.
fn demo_sphere_shell() -> Result<(), Box<dyn std::error::Error>> {
    use sartor_mesh::generators::sphere_shell;
    use sartor_pipeline::GarmentFit;
    use sartor_scene::{Armature, MeshObject, ShapeKey};
    use sartor_math::Vec3;

    println!("Demo: sphere shell");
    println!("──────────────────");

    let body_points = sphere_shell(0.5, 16, 24);
    let n = body_points.vertex_count();

    // Widen the body 10% along X.
    let delta_x: Vec<f32> = (0..n).map(|i| body_points.pos_x[i] * 0.1).collect();
    let mut body = MeshObject::new("body", body_points);
    body.add_shape_key(ShapeKey {
        name: "wider".into(),
        delta_x,
        delta_y: vec![0.0; n],
        delta_z: vec![0.0; n],
        value: 1.0,
        driver: None,
    })?;

    let garment = MeshObject::new("shell", sphere_shell(0.52, 12, 18));

    let mut doc = Document::new();
    let body_id = doc.add_object(body);
    let garment_id = doc.add_object(garment);

    let mut armature = Armature::new("rig");
    armature.add_bone("spine", Vec3::new(0.0, -0.4, 0.0), Vec3::new(0.0, 0.4, 0.0));
    let armature_id = doc.add_armature(armature);

    let before = doc.object_count();

    let bus = EventBus::new();
    let mut fit = GarmentFit::new(body_id, garment_id, FitParams::default());
    let summary = fit.run_all(&mut doc, armature_id, &bus)?;

    println!("Garment:      {}", summary.garment);
    println!("Mapped verts: {}", summary.target_vertices);
    println!("Max offset:   {:.4}m", summary.max_offset);
    println!("Masked:       {}", summary.masked_vertices);
    println!("Groups:       {}", summary.groups_transferred);
    println!(
        "Objects:      {} before, {} after",
        before,
        doc.object_count()
    );

    Ok(())
}
