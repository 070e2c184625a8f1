//! Utility functions for randomly generating datasets

use jpt::{TrainingData, Value, Variable};
use ndarray::{s, Array, Array2, ArrayBase, Data, Ix1, Ix2};
use ndarray_rand::{
    rand::{distributions::WeightedIndex, Rng},
    rand_distr::{Distribution, StandardNormal},
    RandomExt,
};

/// Samples `n` observations of the alarm network
///
/// The variables are, in order, `Earthquake ~ Bool(.2)`, `Burglary ~ Bool(.1)`, the `Alarm`
/// conditioned on both, and `MaryCalls` and `JohnCalls` conditioned on the alarm.
pub fn alarm(n: usize, rng: &mut impl Rng) -> (Vec<Variable>, TrainingData) {
    let variables = vec![
        Variable::boolean("Earthquake"),
        Variable::boolean("Burglary"),
        Variable::boolean("Alarm"),
        Variable::boolean("MaryCalls"),
        Variable::boolean("JohnCalls"),
    ];

    let rows = (0..n)
        .map(|_| {
            let earthquake = rng.gen_bool(0.2);
            let burglary = rng.gen_bool(0.1);
            let alarm = rng.gen_bool(match (earthquake, burglary) {
                (true, true) => 0.95,
                (true, false) => 0.94,
                (false, true) => 0.29,
                (false, false) => 0.001,
            });
            let mary = rng.gen_bool(if alarm { 0.7 } else { 0.01 });
            let john = rng.gen_bool(if alarm { 0.9 } else { 0.05 });

            vec![earthquake, burglary, alarm, mary, john]
                .into_iter()
                .map(Value::from)
                .collect()
        })
        .collect();

    (variables, TrainingData::Rows(rows))
}

/// Samples `n` observations of independent restaurant attributes
pub fn restaurant(n: usize, rng: &mut impl Rng) -> (Vec<Variable>, TrainingData) {
    // (variable, label probabilities)
    let attributes = vec![
        (Variable::boolean("Alternatives"), vec![0.8, 0.2]),
        (Variable::boolean("Bar"), vec![0.8, 0.2]),
        (Variable::boolean("Friday"), vec![6. / 7., 1. / 7.]),
        (Variable::boolean("Hungry"), vec![0.2, 0.8]),
        (
            Variable::symbolic("Patrons", vec!["3", "10", "20"]),
            vec![0.2, 0.6, 0.2],
        ),
        (
            Variable::symbolic("Price", vec!["$", "$$", "$$$"]),
            vec![0.1, 0.7, 0.2],
        ),
        (Variable::boolean("Rain"), vec![0.7, 0.3]),
        (Variable::boolean("Reservation"), vec![0.9, 0.1]),
        (
            Variable::symbolic("Food", vec!["French", "Thai", "Burger", "Italian"]),
            vec![0.1, 0.2, 0.4, 0.3],
        ),
        (
            Variable::symbolic("WaitEst", vec!["10", "30", "60", "120"]),
            vec![0.3, 0.4, 0.2, 0.1],
        ),
    ];

    let columns = attributes
        .iter()
        .map(|(var, probabilities)| {
            // the weights are positive constants
            let index = WeightedIndex::new(probabilities).unwrap();
            let labels = var.labels().unwrap_or(&[]);
            (0..n)
                .map(|_| Value::from(labels[index.sample(rng)].as_str()))
                .collect()
        })
        .collect();

    let variables = attributes.into_iter().map(|(var, _)| var).collect();

    (variables, TrainingData::Columns(columns))
}

/// Samples `blob_size` points around every row of `blob_centroids` with a standard normal
/// distribution.
///
/// Every centroid needs two coordinates. The variables are the numeric coordinates `x` and `y`
/// followed by the symbolic `blob`, labelled with the index of the centroid.
pub fn blobs(
    blob_size: usize,
    blob_centroids: &ArrayBase<impl Data<Elem = f64>, Ix2>,
    rng: &mut impl Rng,
) -> (Vec<Variable>, TrainingData) {
    let n_centroids = blob_centroids.nrows();
    let mut data: Array2<f64> = Array2::zeros((n_centroids * blob_size, 3));

    for (blob_index, blob_centroid) in blob_centroids.rows().into_iter().enumerate() {
        let blob = make_blob(blob_size, &blob_centroid.slice(s![..2]), rng);

        let indexes = s![blob_index * blob_size..(blob_index + 1) * blob_size, ..2];
        data.slice_mut(indexes).assign(&blob);
        data.slice_mut(s![blob_index * blob_size..(blob_index + 1) * blob_size, 2])
            .fill(blob_index as f64);
    }

    let variables = vec![
        Variable::numeric("x"),
        Variable::numeric("y"),
        Variable::symbolic("blob", (0..n_centroids).map(|i| i.to_string())),
    ];

    (variables, TrainingData::Matrix(data))
}

/// Generate `blob_size` data points (a "blob") around `blob_centroid`.
fn make_blob(
    blob_size: usize,
    blob_centroid: &ArrayBase<impl Data<Elem = f64>, Ix1>,
    rng: &mut impl Rng,
) -> Array2<f64> {
    let shape = (blob_size, blob_centroid.len());
    let origin_blob: Array2<f64> = Array::random_using(shape, StandardNormal, rng);
    origin_blob + blob_centroid
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;
    use ndarray::array;
    use rand::{rngs::SmallRng, SeedableRng};

    #[test]
    fn alarm_frequencies() {
        let mut rng = SmallRng::seed_from_u64(42);
        let (variables, data) = alarm(5000, &mut rng);
        let matrix = data.into_matrix(&variables).unwrap();

        assert_eq!(matrix.dim(), (5000, 5));
        // earthquakes happen in a fifth of the observations
        let earthquakes = matrix.column(0).sum() / 5000.;
        assert_abs_diff_eq!(earthquakes, 0.2, epsilon = 0.03);
        // Mary misses some of the alarms
        let alarms = matrix.column(2).sum();
        let mary = matrix.column(3).sum();
        assert!(mary < alarms);
    }

    #[test]
    fn restaurant_uses_every_variable() {
        let mut rng = SmallRng::seed_from_u64(42);
        let (variables, data) = restaurant(200, &mut rng);
        let matrix = data.into_matrix(&variables).unwrap();

        assert_eq!(matrix.dim(), (200, 10));
        assert_eq!(variables[4].name(), "Patrons");
        // Price = $$ is the most frequent price
        let mid = matrix.column(5).iter().filter(|&&v| v == 1.).count();
        assert!(mid > 100);
    }

    #[test]
    fn blobs_are_labelled() {
        let mut rng = SmallRng::seed_from_u64(42);
        let centroids = array![[0., 0.], [10., 10.]];
        let (variables, data) = blobs(50, &centroids, &mut rng);
        let matrix = data.into_matrix(&variables).unwrap();

        assert_eq!(matrix.dim(), (100, 3));
        assert_eq!(matrix[(0, 2)], 0.);
        assert_eq!(matrix[(99, 2)], 1.);
        let mean_x = matrix.slice(s![50.., 0]).mean().unwrap();
        assert_abs_diff_eq!(mean_x, 10., epsilon = 0.5);
    }
}
