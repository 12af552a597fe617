/*
 * q2.rs - Descriptor inheritance
 *
 * usage: q2
 * Opens src/bin/q1.rs, then forks. Parent and child each read a few bytes
 * through the same descriptor and print what they got.
 */

use forkdemo::{demo, utils};

fn main() {
    utils::init_logging();

    if let Err(err) = demo::inherit_handle(demo::COMPANION_PATH) {
        utils::fail(&err);
    }
}
