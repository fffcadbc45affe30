use hydrant::ast::{
    Attr, AttrPart, Block, Call, Component, Element, Expr, Mustache, Program, Statement, Template,
};
use rand::Rng;

/// Generates a page listing `n` users, each with a random name and a random
/// mix of static and dynamic markup.
pub fn random(n: usize) -> Template {
    let mut rng = rand::thread_rng();
    let title: String = (0..20).map(|_| rng.gen_range('a'..='z')).collect();

    let users = (0..n)
        .map(|_| {
            let name: String = (0..20).map(|_| rng.gen_range('a'..='z')).collect();
            let mut row = Element::new("tr")
                .attr(Attr::text("class", name))
                .child(Element::new("td").child(Mustache::path("user.name")))
                .child(Element::new("td").child(Mustache::new(
                    Call::new("format-age").param(Expr::path("user.age")),
                )));
            if rng.gen_ratio(1, 4) {
                row = row.attr(Attr::new(
                    "data-state",
                    vec![AttrPart::text("disabled "), AttrPart::path("user.id")],
                ));
            }
            if rng.gen_ratio(1, 2) {
                row = row.child(
                    Component::new("user-badge")
                        .attr(Attr::new("user", vec![AttrPart::path("user")]).unquoted()),
                );
            }
            Statement::from(row)
        })
        .collect::<Vec<_>>();

    let table = Element::new("table").child(Block::new(
        Call::new("each").param(Expr::path("users")),
        Program::new(vec![Element::new("tbody").into()]).block_params(["user"]),
    ));
    let list = users
        .into_iter()
        .fold(Element::new("div"), |list, row| list.child(row));

    Template::new(Program::new(vec![
        Element::new("h1")
            .child(Statement::text(title))
            .child(Mustache::path("title"))
            .into(),
        Statement::text(""),
        table.into(),
        list.into(),
    ]))
}
