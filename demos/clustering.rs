//! K-means on a simple 2D dataset, with pruned and brute-force steps side by side.

use hamerly::{
    Centroids, Clustering, Dataset, Euclidean, HamerlyKmeans, Kmeans, KmeansStep, NaiveKmeans,
};

fn main() {
    // Three well-separated clusters in 2D.
    let data: Vec<Vec<f32>> = vec![
        // Cluster A (near origin)
        vec![0.0, 0.0],
        vec![0.1, 0.2],
        vec![0.2, 0.1],
        vec![-0.1, 0.1],
        // Cluster B (near (5, 5))
        vec![5.0, 5.0],
        vec![5.1, 4.9],
        vec![4.9, 5.1],
        vec![5.2, 5.2],
        // Cluster C (near (10, 0))
        vec![10.0, 0.0],
        vec![10.1, 0.1],
        vec![9.9, -0.1],
        vec![10.2, 0.2],
    ];

    // --- K-means (k=3) ---
    let kmeans = Kmeans::new(3).with_seed(42);
    let labels = kmeans.fit_predict(&data).unwrap();
    println!("=== K-means (k=3) ===");
    for (i, label) in labels.iter().enumerate() {
        println!(
            "  point {:2} ({:5.1}, {:5.1}) => cluster {}",
            i, data[i][0], data[i][1], label
        );
    }

    // --- Step by step: Hamerly vs brute force ---
    let (flat, dim) = Dataset::flatten(&data).unwrap();
    let ds = Dataset::new(&flat, dim).unwrap();
    let mut hamerly = HamerlyKmeans::new(ds, Euclidean);
    let mut naive = NaiveKmeans::new(ds, Euclidean);
    let mut centroids = Centroids::new(vec![1.0, 1.0, 4.0, 4.0, 9.0, 1.0], dim).unwrap();

    println!("\n=== Steps (k=3) ===");
    for step in 1..=5 {
        let fast = hamerly.iterate(&centroids).unwrap();
        let slow = naive.iterate(&centroids).unwrap();
        assert_eq!(hamerly.assignments(), naive.assignments());
        println!(
            "  step {} movement {:.4} counts {:?} evaluations hamerly={} naive={}",
            step,
            fast.movement,
            fast.counts,
            hamerly.distance_calculations(),
            naive.distance_calculations()
        );
        centroids = slow.centroids;
    }
}
