#![cfg(feature = "wav")]

use std::io::Cursor;

use drizzle::*;

fn rain() -> Rain {
    let config = RainConfig {
        drop_count: 16,
        seed: Some(77),
        ..RainConfig::default()
    };
    config.build(8000).unwrap()
}

#[test]
fn wav_matches_render() {
    let mut bytes = Cursor::new(Vec::new());
    let mut exported = rain();
    let frames = wav::write_rain(&mut bytes, &mut exported, 0.1).unwrap();
    assert_eq!(frames, 800);

    let mut expected = vec![0.0f32; 1600];
    let mut rendered = rain();
    rendered.render(&mut expected);
    assert_eq!(exported.time(), rendered.time());

    bytes.set_position(0);
    let reader = hound::WavReader::new(bytes).unwrap();
    let spec = reader.spec();
    assert_eq!(spec.channels, 2);
    assert_eq!(spec.sample_rate, 8000);
    assert_eq!(spec.sample_format, hound::SampleFormat::Float);
    let samples: Vec<f32> = reader.into_samples().map(Result::unwrap).collect();
    assert_eq!(samples, expected);
}

#[test]
fn successive_exports_continue_the_soundscape() {
    let mut rain_a = rain();
    let mut first = Cursor::new(Vec::new());
    let mut second = Cursor::new(Vec::new());
    wav::write_rain(&mut first, &mut rain_a, 0.05).unwrap();
    wav::write_rain(&mut second, &mut rain_a, 0.05).unwrap();

    let mut expected = vec![0.0f32; 1600];
    rain().render(&mut expected);

    let mut samples = Vec::new();
    for bytes in [first, second] {
        let reader = hound::WavReader::new(Cursor::new(bytes.into_inner())).unwrap();
        samples.extend(reader.into_samples::<f32>().map(Result::unwrap));
    }
    assert_eq!(samples, expected);
}
