/// Port and signal types for module interconnection

/// A wire carrying a value between modules, qualified by a select/valid strobe.
///
/// Bus requests use `valid` as the chip-select: a request whose strobe is low
/// is not seen by the register file at all.
#[derive(Clone, Debug)]
pub struct Wire<T: Clone> {
  pub value: T,
  pub valid: bool,
}

impl<T: Clone> Wire<T> {
  pub fn new(value: T) -> Self {
    Self { value, valid: false }
  }

  /// A wire already driven with `value`.
  pub fn driven(value: T) -> Self {
    Self { value, valid: true }
  }

  pub fn set(&mut self, value: T) {
    self.value = value;
    self.valid = true;
  }

  pub fn clear(&mut self) {
    self.valid = false;
  }

  /// The carried value when the strobe is high.
  pub fn get(&self) -> Option<&T> {
    if self.valid {
      Some(&self.value)
    } else {
      None
    }
  }
}

impl<T: Clone + Default> Default for Wire<T> {
  fn default() -> Self {
    Self {
      value: T::default(),
      valid: false,
    }
  }
}
