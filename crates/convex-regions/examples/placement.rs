//! Place an object on a table top, away from a wall, and report how many
//! candidates the rejection loop threw away.
//!
//! Run: `cargo run -p convex-regions --example placement`

use convex_regions::prelude::*;
use nalgebra::vector;
use rand::{rngs::StdRng, SeedableRng};
use tracing::Level;
use tracing_subscriber::fmt::SubscriberBuilder;

fn main() -> Result<(), RegionError> {
    SubscriberBuilder::default()
        .with_max_level(Level::DEBUG)
        .with_target(false)
        .init();

    // 1.2 x 0.8 table top at height 0.75
    let top = Rectangle3D::new(1.2, 0.8, vector![0.0, 0.0, 0.75], Vector3D::zeros())?;
    let table: Region = top.clone().into();

    // stay on the far side of x = 0.1 and inside reach of a robot at the origin
    let wall: Region = HalfSpace::new(vector![0.1, 0.0, 0.0], vector![1.0, 0.0, 0.0])?.into();
    let reach: Region = Spherical::new(vector![0.0, 0.0, 0.75], 0.6)?.into();

    // the wall side of the table, as an explicit region
    let table_polygon: Region = top.to_polygon(&HsiCfg::default())?.into();
    let allowed = intersect(&wall, &table_polygon)?;
    println!("allowed region: {}", allowed.kind());

    let mut rng = StdRng::seed_from_u64(2024);
    let sampler = RejectionSampler::new(SampleCfg { max_attempts: 500 });
    match sampler.sample(&table, &[wall, reach], &mut rng) {
        Some(p) => {
            println!(
                "placed at ({:.3}, {:.3}, {:.3}) after {} rejections",
                p.point.x, p.point.y, p.point.z, p.rejections
            );
            assert!(contains_point(&allowed, &p.point));
        }
        None => println!("no placement found"),
    }
    Ok(())
}
