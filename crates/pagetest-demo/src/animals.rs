//! The demo's application code and the tests it registers for itself.

use pagetest::TestRegistry;

/// Something that makes a sound
pub trait Animal {
    /// The animal's sound
    fn make_sound(&self) -> &'static str;
}

/// A cat
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Cat;

impl Cat {
    /// Create a cat
    #[must_use]
    pub const fn new() -> Self {
        Self
    }
}

impl Animal for Cat {
    fn make_sound(&self) -> &'static str {
        "meow"
    }
}

/// A dog
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Dog;

impl Dog {
    /// Create a dog
    #[must_use]
    pub const fn new() -> Self {
        Self
    }
}

impl Animal for Dog {
    fn make_sound(&self) -> &'static str {
        "woof"
    }
}

/// Sounds of `animals`, in order
#[must_use]
pub fn chorus(animals: &[&dyn Animal]) -> Vec<&'static str> {
    animals.iter().map(|a| a.make_sound()).collect()
}

/// Register the animal tests
pub fn register_tests(registry: &mut TestRegistry) {
    registry.add("TestCat", |t| {
        let cat = Cat::new();
        t.assert_equal("meow", cat.make_sound());
    });

    registry.add("TestDog", |t| {
        let dog = Dog::new();
        t.assert_equal("woof", dog.make_sound());
    });

    registry.add("TestChorus", |t| {
        let sounds = chorus(&[&Cat::new(), &Dog::new()]);
        t.assert_deep_equal(&["meow", "woof"], &sounds);
    });
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sounds() {
        assert_eq!(Cat::new().make_sound(), "meow");
        assert_eq!(Dog::new().make_sound(), "woof");
    }

    #[test]
    fn test_chorus_order() {
        assert_eq!(chorus(&[&Dog, &Cat, &Dog]), vec!["woof", "meow", "woof"]);
        assert!(chorus(&[]).is_empty());
    }

    #[test]
    fn test_registers_in_order() {
        let mut registry = TestRegistry::new();
        register_tests(&mut registry);
        assert_eq!(registry.names(), vec!["TestCat", "TestDog", "TestChorus"]);
    }
}
