use crate::error::ConfiguratorError;
use confine_domain::Value;

/// Mutable storage a [`Configurator`](crate::Configurator) reads from once and writes back to once.
pub trait Destination {
    /// The value currently held; its type is the target type of the configuration.
    ///
    /// # Errors
    /// Returns [`ConfiguratorError::NotConfigurable`] when there is nothing to configure.
    fn load(&self) -> Result<Value, ConfiguratorError>;

    /// Replaces the held value with `value`, which has the type `load` reported.
    ///
    /// # Errors
    /// Returns [`ConfiguratorError::Internal`] when `value` does not fit the storage.
    fn store(&mut self, value: Value) -> Result<(), ConfiguratorError>;
}

/// A [`Value`] is configured through its indirections: `Ref(Some(v))` configures `v`.
impl Destination for Value {
    fn load(&self) -> Result<Value, ConfiguratorError> {
        if self.is_nil() {
            return Err(nil());
        }
        self.pointee().map_or_else(|| Ok(self.clone()), Destination::load)
    }

    fn store(&mut self, value: Value) -> Result<(), ConfiguratorError> {
        if self.is_nil() {
            return Err(nil());
        }
        match self.pointee_mut() {
            Some(inner) => inner.store(value),
            None => {
                *self = value;
                Ok(())
            },
        }
    }
}

pub(crate) fn nil() -> ConfiguratorError {
    ConfiguratorError::not_configurable(format!(
        "argument of type '{}' should not be nil",
        Value::nil().type_name()
    ))
}

/// `None` has no storage to configure.
impl<D: Destination> Destination for Option<D> {
    fn load(&self) -> Result<Value, ConfiguratorError> {
        self.as_ref().ok_or_else(absent)?.load()
    }

    fn store(&mut self, value: Value) -> Result<(), ConfiguratorError> {
        self.as_mut().ok_or_else(absent)?.store(value)
    }
}

fn absent() -> ConfiguratorError {
    ConfiguratorError::not_configurable("argument should not be absent")
}

macro_rules! native_destinations {
    ($($ty:ty),* $(,)?) => {$(
        impl Destination for $ty {
            fn load(&self) -> Result<Value, ConfiguratorError> {
                Ok(Value::from(*self))
            }

            fn store(&mut self, value: Value) -> Result<(), ConfiguratorError> {
                *self = <$ty>::try_from(value).map_err(|v| mismatch(&v, stringify!($ty)))?;
                Ok(())
            }
        }
    )*};
}

native_destinations!(bool, i8, i16, i32, i64, isize, u8, u16, u32, u64, usize, f32, f64);

impl Destination for String {
    fn load(&self) -> Result<Value, ConfiguratorError> {
        Ok(Value::Str(self.clone()))
    }

    fn store(&mut self, value: Value) -> Result<(), ConfiguratorError> {
        *self = Self::try_from(value).map_err(|v| mismatch(&v, "String"))?;
        Ok(())
    }
}

fn mismatch(value: &Value, target: &str) -> ConfiguratorError {
    ConfiguratorError::from(format!(
        "value of type '{}' can not be stored in '{target}'",
        value.type_name()
    ))
}
