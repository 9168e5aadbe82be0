pub mod aws;
pub mod file;
pub mod limits;
pub mod node;

#[cfg(test)]
mod test_util;
