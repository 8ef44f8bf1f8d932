pub mod batch;
pub mod common;
pub mod init;
pub mod pair;
pub mod run;

pub use batch::Batch;
pub use common::RunOptions;
pub use init::Init;
pub use pair::Pair;
pub use run::Run;
