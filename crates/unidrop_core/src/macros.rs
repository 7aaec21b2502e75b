//! Macros for reducing boilerplate in builder implementations.

/// Generates a builder-style setter method for a field.
///
/// # Usage
///
/// ```ignore
/// // When method name matches field name:
/// builder_field!(open_class, String);
/// // Generates: pub fn open_class(mut self, value: String) -> Self { self.open_class = value; self }
///
/// // When method name differs from field name:
/// builder_field!(is_open, initially_open, bool);
/// ```
#[macro_export]
macro_rules! builder_field {
    // Method name matches field name
    ($name:ident, $type:ty) => {
        pub fn $name(mut self, value: $type) -> Self {
            self.$name = value;
            self
        }
    };
    // Method name differs from field name
    ($method:ident, $field:ident, $type:ty) => {
        pub fn $method(mut self, value: $type) -> Self {
            self.$field = value;
            self
        }
    };
}

/// Generates a builder-style setter method for an Option field.
///
/// # Usage
///
/// ```ignore
/// builder_option!(class_target, Rc<dyn ClassTarget>);
/// // Generates: pub fn class_target(mut self, value: Rc<dyn ClassTarget>) -> Self { self.class_target = Some(value); self }
/// ```
#[macro_export]
macro_rules! builder_option {
    ($name:ident, $type:ty) => {
        pub fn $name(mut self, value: $type) -> Self {
            self.$name = Some(value);
            self
        }
    };
}

/// Generates a setter that installs a side-effect [`Callback`](crate::Callback).
///
/// # Usage
///
/// ```ignore
/// callback_setter!(on_toggle, ToggleEvent);
/// // Generates: pub fn on_toggle<F>(mut self, f: F) -> Self where F: Fn(ToggleEvent) + 'static
/// ```
#[macro_export]
macro_rules! callback_setter {
    ($name:ident, $param:ty) => {
        pub fn $name<F>(mut self, f: F) -> Self
        where
            F: Fn($param) + 'static,
        {
            self.$name = $crate::Callback::new(f);
            self
        }
    };
}
