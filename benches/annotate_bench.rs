use criterion::{black_box, criterion_group, criterion_main, Criterion};
use korpus::pipelines::Annotator;
use korpus::tagger::{LexiconTagger, Tagger};

fn corpus(documents: usize) -> String {
    let text = "§ 1 Die Rechtsfähigkeit des Menschen beginnt mit der Vollendung der Geburt.\n\
                (2) Das Nähere regelt ein Bundesgesetz, vgl. Art. 3 Abs. 1 GG.\n";
    let mut out = String::from("<corpus>\n");
    for i in 0..documents {
        out.push_str(&format!(
            "<text type=\"Gesetz\" level=\"Bund\" title=\"Gesetz {i}\">\n{}</text>\n",
            text.repeat(20)
        ));
    }
    out.push_str("</corpus>\n");
    out
}

pub fn tag(c: &mut Criterion) {
    let tagger = LexiconTagger::new();
    let text = corpus(1);
    c.bench_function("lexicon_tag", |b| {
        b.iter(|| tagger.tag(black_box(&text)).map(|tokens| tokens.len()))
    });
}

pub fn annotate(c: &mut Criterion) {
    let annotator = Annotator::new(LexiconTagger::new());
    let src = corpus(50);
    c.bench_function("annotate_stream", |b| {
        b.iter(|| {
            let mut out = Vec::with_capacity(src.len() * 4);
            annotator
                .annotate(black_box(src.as_bytes()), &mut out)
                .map(|stats| stats.units)
        })
    });
}

criterion_group!(benches, tag, annotate);
criterion_main!(benches);
