use platstep_core::{Grounded, Keys, Physical, Scene};

fn main() {
    let mut scene = Scene::default();

    let mut landed: u32 = 0;
    let mut took_off: u32 = 0;
    let mut contacts: u32 = 0;

    for frame in 0..200 {
        let mut keys = Keys::empty();
        if frame < 120 {
            keys |= Keys::RIGHT;
        }
        if frame == 10 {
            keys |= Keys::UP;
        }

        let ev = match scene.advance(keys, 25.0) {
            Ok(ev) => ev,
            Err(err) => {
                eprintln!("frame {frame}: {err}");
                return;
            }
        };
        landed += ev.landed as u32;
        took_off += ev.took_off as u32;
        contacts += ev.contacts.bits().count_ones();
    }

    let body = scene.character.body();
    let summary = serde_json::json!({
        "x": body.position.x,
        "y": body.position.y,
        "vx": body.velocity.x,
        "vy": body.velocity.y,
        "landing": scene.character.is_landing(),
        "landed": landed,
        "took_off": took_off,
        "contacts": contacts,
    });
    println!("{summary}");
}
