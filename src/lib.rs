pub mod error;
pub mod forest {
    pub mod forest;
}
pub mod tree {
    pub mod node;
    pub mod tree;
}
pub mod utils {
    pub mod io;
    pub mod random;
    pub mod statistics;
    pub mod structures;
}

pub type RandomGenerator = rand_chacha::ChaCha8Rng;

pub use error::ForestError;
pub use forest::forest::{Forest, ForestConfig};
pub use tree::node::Node;
pub use utils::io::{read_config, read_csv, write_csv};
pub use utils::random::{ChaChaSource, RandomSource};
pub use utils::structures::{Feature, FeatureStats, Sample};
