#[derive(Default, Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum Mode {
  #[default]
  Default,
  Error,
}
