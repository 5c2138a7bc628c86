pub mod logging;
pub mod tensor;

pub use logging::{FileLogger, StdoutLogger, init_file_logger, init_stdout_logger};
pub use tensor::{Tensor, TensorError, element_count};

pub use log;
