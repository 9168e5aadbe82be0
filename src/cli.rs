mod generate;
mod node;

pub use generate::GenerateArgs;
pub use node::NodeArgs;
