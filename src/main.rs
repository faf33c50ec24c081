use log::error;

fn main() {
    if let Err(err) = voxel_world::run() {
        error!("{}", err);
        eprintln!("voxel-world: {}", err);
        std::process::exit(1);
    }
}
