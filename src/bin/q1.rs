/*
 * q1.rs - Process duplication
 *
 * usage: q1
 * Forks once. The child sets its copy of x to 150 and the parent sets its
 * own to 200; each prints what it holds.
 */

use forkdemo::{demo, utils};

fn main() {
    utils::init_logging();

    if let Err(err) = demo::duplicate_value() {
        utils::fail(&err);
    }
}
