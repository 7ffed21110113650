mod banner;
mod bootstrap;
mod discovery;
mod helpers;
mod launch;
mod supervise;
