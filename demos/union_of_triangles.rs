//! Draw points uniformly over a union of triangles and compare how many land in
//! each triangle with that triangle's share of the total area.

use ndarray::{array, Axis};
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use ransu::{barycentric, simplex_volume, uniform_simplices_with_rng};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let points = array![
        [0.0, 0.0],
        [1.0, 1.0],
        [2.0, 1.0],
        [2.0, 0.0],
        [4.0, 0.0],
        [0.0, 2.0],
        [2.0, 2.0]
    ];
    let simplices = array![[0usize, 5, 6], [2, 1, 6], [3, 6, 4]];
    let size = 5_000;

    let mut rng = ChaCha8Rng::seed_from_u64(121_263_137);
    let pts = uniform_simplices_with_rng(points.view(), simplices.view(), size, &mut rng)?;

    let triangles: Vec<_> = simplices
        .rows()
        .into_iter()
        .map(|idx| points.select(Axis(0), &idx.to_vec()))
        .collect();
    let areas = triangles
        .iter()
        .map(|t| simplex_volume(t.view()))
        .collect::<Result<Vec<f64>, _>>()?;
    let total_area: f64 = areas.iter().sum();

    let mut hits = vec![0usize; triangles.len()];
    for p in pts.rows() {
        let p = p.to_vec();
        if let Some(i) = triangles.iter().position(|t| {
            barycentric(t.view(), &p).is_some_and(|lam| lam.iter().all(|&l| l >= -1e-9))
        }) {
            hits[i] += 1;
        }
    }

    println!("{size} points over {} triangles", triangles.len());
    for (i, (&h, &a)) in hits.iter().zip(&areas).enumerate() {
        println!(
            "  triangle {i}: area={a:.3}  area share={:.4}  sample share={:.4}",
            a / total_area,
            h as f64 / size as f64
        );
    }

    Ok(())
}
