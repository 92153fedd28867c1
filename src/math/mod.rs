pub mod linalg;
pub mod matrix;

pub use linalg::{dot, dot_direct, dot_law_of_cosines, mat_mat, mat_vec, outer, transpose};
pub use matrix::Matrix;
