use std::fs;
use std::path::Path;

const PLACEHOLDER_INDEX: &str = "<!DOCTYPE html><html lang=\"he\" dir=\"rtl\"><body>\
<p>The dashboard front end was not built. Run <code>trunk build --release</code> in <code>frontend/</code>.</p>\
</body></html>";

fn main() {
    let out_dir = Path::new("static");
    let dist_dir = Path::new("../frontend/dist");

    let _ = fs::remove_dir_all(out_dir);
    fs::create_dir_all(out_dir).unwrap();
    if dist_dir.exists() {
        fs_extra::dir::copy(
            dist_dir,
            out_dir,
            &fs_extra::dir::CopyOptions::new().overwrite(true),
        )
            .unwrap();
    } else {
        // include_dir! needs the directory to exist
        fs::create_dir_all(out_dir.join("dist")).unwrap();
        fs::write(out_dir.join("dist/index.html"), PLACEHOLDER_INDEX).unwrap();
    }
    println!("cargo:rerun-if-changed=../frontend/dist");
}
