use criterion::{criterion_group, criterion_main, Criterion};
use std::hint::black_box;

use std::path::Path;
use toastscan::extract::Extractor;
use toastscan::options::Options;

fn component_source() -> String {
    let block = r#"
export function Row({ item, onSave }: Props) {
  const save = async () => {
    const id = toast.loading("Saving " + item.name);
    try {
      await onSave(item, { retries: Math.max(1, (item.retries ?? 0) - 1) });
      toast.success(`Saved ${item.name}`, { id });
    } catch (e) {
      toast.error(formatError(e, (m) => m.trim()), { id });
    }
  };
  // toast("not really")
  return <button onClick={save}>{label(item)}</button>;
}
"#;
    block.repeat(500)
}

fn bench_extractor(c: &mut Criterion) {
    let text = component_source();
    let mut group = c.benchmark_group("extractor");
    for skip_literals in [false, true] {
        let options = Options {
            skip_literals,
            ..Options::default()
        };
        let extractor = Extractor::new(&options).unwrap();
        let name = if skip_literals { "skip literals" } else { "plain" };
        group.bench_function(name, |b| {
            b.iter(|| extractor.scan(Path::new("Row.tsx"), black_box(&text)))
        });
    }
    group.finish();
}

criterion_group!(benches, bench_extractor);
criterion_main!(benches);
