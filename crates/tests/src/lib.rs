
#[cfg(test)]
mod auth_tests;
#[cfg(test)]
mod blackout_tests;
#[cfg(test)]
mod invitation_tests;
