//! Template trees shaped like a typical list page, used by the benchmarks.

pub mod context;

#[cfg(test)]
mod tests {
    use super::context;

    #[test]
    fn random_template_compiles() {
        let template = context::random(10);
        let program = hydrant::compile(&template).unwrap();
        assert_eq!(program.children().len(), 1);
        assert!(program.morphs().count() > 10);
    }
}
