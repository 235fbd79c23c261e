use argh::FromArgs;
use glam::{DMat3, DVec3};
use rand::Rng;

use kornia_procrustes::{metrics, AlignParams, Pose, ProcrustesAligner};

#[derive(FromArgs)]
/// Recover a known rigid motion from synthetic 3D correspondences
struct Args {
    /// number of corresponding points
    #[argh(option, short = 'n', default = "100")]
    num_points: usize,

    /// rotation angle in degrees
    #[argh(option, default = "30.0")]
    angle_deg: f64,

    /// half-width of the uniform noise added to the target points
    #[argh(option, default = "0.0")]
    noise: f64,

    /// fail instead of warning on degenerate point configurations
    #[argh(switch)]
    strict: bool,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::init();
    let args: Args = argh::from_env();

    let mut rng = rand::rng();

    // ground truth motion
    let axis = DVec3::new(
        rng.random_range(-1.0..1.0),
        rng.random_range(-1.0..1.0),
        rng.random_range(-1.0..1.0),
    )
    .try_normalize()
    .unwrap_or(DVec3::Z);
    let dst_r_src = DMat3::from_axis_angle(axis, args.angle_deg.to_radians());
    let dst_t_src = DVec3::new(
        rng.random_range(-2.0..2.0),
        rng.random_range(-2.0..2.0),
        rng.random_range(-2.0..2.0),
    );
    let expected = Pose::from_rotation_translation(dst_r_src, dst_t_src);

    // synthetic correspondences in a unit cube
    let source = (0..args.num_points)
        .map(|_| {
            DVec3::new(
                rng.random_range(-0.5..0.5),
                rng.random_range(-0.5..0.5),
                rng.random_range(-0.5..0.5),
            )
        })
        .collect::<Vec<_>>();

    let mut target = vec![DVec3::ZERO; source.len()];
    expected.transform_points(&source, &mut target)?;
    if args.noise > 0.0 {
        for p in target.iter_mut() {
            *p += DVec3::new(
                rng.random_range(-args.noise..args.noise),
                rng.random_range(-args.noise..args.noise),
                rng.random_range(-args.noise..args.noise),
            );
        }
    }
    log::info!("Generated {} correspondences", source.len());

    let aligner = ProcrustesAligner::new(AlignParams {
        reject_degenerate: args.strict,
        ..Default::default()
    });
    let result = aligner.align(&source, &target)?;

    println!("Expected pose:\n{}", format_pose(&expected));
    println!("Estimated pose:\n{}", format_pose(&result.pose));
    println!("Singular values: {}", result.singular_values);
    println!(
        "Rank: {} | reflection corrected: {}",
        result.rank, result.reflection_corrected
    );
    println!("RMSE (estimated): {:.6e}", result.rmse);
    println!(
        "RMSE (ground truth): {:.6e}",
        metrics::rmse(&expected, &source, &target)?
    );

    // angle of the residual rotation R_est^T * R_gt
    let residual = result.pose.rotation().transpose() * dst_r_src;
    let cos_angle = ((residual.x_axis.x + residual.y_axis.y + residual.z_axis.z - 1.0) / 2.0)
        .clamp(-1.0, 1.0);
    println!("Rotation error: {:.6e} deg", cos_angle.acos().to_degrees());
    println!(
        "Translation error: {:.6e}",
        result.pose.translation().distance(dst_t_src)
    );

    Ok(())
}

fn format_pose(pose: &Pose) -> String {
    pose.to_rows_array()
        .iter()
        .map(|row| {
            row.iter()
                .map(|v| format!("{v:>10.6}"))
                .collect::<Vec<_>>()
                .join(" ")
        })
        .collect::<Vec<_>>()
        .join("\n")
}
