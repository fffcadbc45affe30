/// The compiler configuration.
///
/// Use [`Options::default()`] to get the default configuration and
/// [`Options::builder()`] to create a custom one.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Options {
    pub(crate) repair_blank_text: bool,
    pub(crate) repair_checked: bool,
    pub(crate) cache_threshold: u32,
}

/// A builder for the compiler configuration.
///
/// This struct is typically created using [`Options::builder()`].
#[derive(Debug, Clone)]
pub struct OptionsBuilder {
    repair_blank_text: bool,
    repair_checked: bool,
    cache_threshold: u32,
}

impl Default for Options {
    /// Returns the default configuration.
    ///
    /// This is equivalent to the following.
    /// ```
    /// use hydrant::Options;
    ///
    /// let options = Options::builder()
    ///     .repair_blank_text(true)
    ///     .repair_checked(true)
    ///     .cache_threshold(1)
    ///     .build();
    /// assert_eq!(options, Options::default());
    /// ```
    #[inline]
    fn default() -> Self {
        Options::builder().build()
    }
}

impl Options {
    /// Create a new options builder.
    ///
    /// # Examples
    ///
    /// ```
    /// let options = hydrant::Options::builder()
    ///     .repair_blank_text(false)
    ///     .build();
    /// ```
    #[inline]
    pub fn builder() -> OptionsBuilder {
        OptionsBuilder::new()
    }

    /// Whether blank text nodes are repaired after cloning.
    #[inline]
    pub fn repairs_blank_text(&self) -> bool {
        self.repair_blank_text
    }

    /// Whether the `checked` attribute is repaired after cloning.
    #[inline]
    pub fn repairs_checked(&self) -> bool {
        self.repair_checked
    }

    /// The number of dynamic uses above which an element reference is cached
    /// as soon as the element is opened.
    #[inline]
    pub fn cache_threshold(&self) -> u32 {
        self.cache_threshold
    }
}

impl OptionsBuilder {
    /// Creates a new options builder with the default settings.
    #[inline]
    #[allow(clippy::new_without_default)]
    pub fn new() -> Self {
        Self {
            repair_blank_text: true,
            repair_checked: true,
            cache_threshold: 1,
        }
    }

    /// Set whether to emit repairs for blank text nodes.
    ///
    /// Some browsers drop empty text nodes when cloning a fragment. Disable
    /// this if the runtime only targets browsers that keep them.
    #[inline]
    pub fn repair_blank_text(&mut self, yes: bool) -> &mut Self {
        self.repair_blank_text = yes;
        self
    }

    /// Set whether to emit repairs for elements with a `checked` attribute.
    #[inline]
    pub fn repair_checked(&mut self, yes: bool) -> &mut Self {
        self.repair_checked = yes;
        self
    }

    /// Set the number of dynamic uses above which an element reference is
    /// cached eagerly.
    #[inline]
    pub fn cache_threshold(&mut self, n: u32) -> &mut Self {
        self.cache_threshold = n;
        self
    }

    /// Builds the compiler configuration.
    #[inline]
    pub fn build(&self) -> Options {
        Options {
            repair_blank_text: self.repair_blank_text,
            repair_checked: self.repair_checked,
            cache_threshold: self.cache_threshold,
        }
    }
}
