// benches/ladder_parse.rs
use criterion::{Criterion, black_box, criterion_group, criterion_main};

use ladder_scrape::core::html;
use ladder_scrape::specs::ladder::LadderHandler;

fn synthetic_page(rows: usize) -> String {
    let mut doc = String::from(
        "<table class=\"ladder\">\n<tr><th>Rank</th><th>Name</th><th>Won</th><th>Played</th><th>Rating</th></tr>\n",
    );
    for i in 0..rows {
        let played = (i % 400) * 2;
        doc.push_str(&format!(
            "<tr><td>{}</td><td><a href=\"/player/{i}\">Player_{i}</a></td><td>{}</td><td>{played}</td><td>{}</td></tr>\n",
            i + 1,
            i % 400,
            1500 + (i % 1000),
        ));
    }
    doc.push_str("</table>");
    doc
}

fn bench_ladder(c: &mut Criterion) {
    let doc = synthetic_page(5_000);

    c.bench_function("ladder_parse_5k", |b| {
        b.iter(|| {
            let entries =
                html::parse_fragment(black_box(&doc), LadderHandler::new()).expect("parse");
            black_box(entries.len())
        })
    });
}

criterion_group!(benches, bench_ladder);
criterion_main!(benches);
